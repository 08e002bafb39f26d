//! Generic records produced by configured routes.

use std::rc::Rc;

use serde::Serialize;

use crate::address::Addressable;
use crate::core::Variables;

/// Kind of the record every route table resolves from.
pub const ROOT_KIND: &str = "root";

/// An object produced by a configured route.
///
/// Carries the variables of the pattern that produced it. Records created
/// for segments without a lookup have an empty kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Record {
    pub kind: String,
    pub vars: Variables,
}

impl Record {
    pub fn new(kind: impl Into<String>, vars: Variables) -> Self {
        Self {
            kind: kind.into(),
            vars,
        }
    }

    /// A fresh root record.
    pub fn root() -> Rc<Self> {
        Rc::new(Self::new(ROOT_KIND, Variables::new()))
    }

    /// Whether this record stands in for a segment without a lookup.
    #[inline]
    pub fn is_placeholder(&self) -> bool {
        self.kind.is_empty()
    }
}

impl Addressable for Record {
    fn kind(&self) -> &str {
        &self.kind
    }
}
