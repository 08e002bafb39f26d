//! Route table installation and record interning.

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use super::record::Record;
use crate::address::{Consumed, Patterns};
use crate::config::{ConfigError, RouteConfig, RouteDiagnostic, RouteDiagnostics};
use crate::core::{FLOAT, INT, Step, Variables, builtin, render_pattern};
use crate::debug;
use crate::error::{Error, LocationError, RecordError, RegistrationError, ResolutionError};

/// A route that made it into the registry.
#[derive(Debug, Clone)]
pub struct InstalledRoute {
    /// Position of the entry in the config.
    pub index: usize,
    /// Canonical pattern text.
    pub pattern: String,
    pub kind: String,
    pub locate: bool,
    pub steps: Vec<Step>,
}

impl InstalledRoute {
    /// Variable names bound by this route, in pattern order.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().filter_map(Step::variable_name)
    }
}

/// Shared record cache keyed by route and the route's own variables.
#[derive(Clone, Default)]
struct Memo(Rc<RefCell<FxHashMap<(usize, String), Rc<Record>>>>);

impl Memo {
    /// Return the record for `vars`, creating it on first use.
    fn intern(&self, index: usize, kind: &str, vars: Variables) -> Rc<Record> {
        let key = (index, cache_key(&vars));
        let mut cache = self.0.borrow_mut();
        let record = cache
            .entry(key)
            .or_insert_with(|| Rc::new(Record::new(kind, vars)));
        Rc::clone(record)
    }

    /// Lookup for one route: picks the route's variables and interns.
    ///
    /// Returns `None` when a variable of the route is missing.
    fn lookup(
        &self,
        index: usize,
        kind: &str,
        steps: &[Step],
    ) -> impl Fn(&Variables) -> Option<Rc<Record>> + 'static {
        let memo = self.clone();
        let kind = kind.to_string();
        let names: Vec<String> = steps
            .iter()
            .filter_map(Step::variable_name)
            .map(str::to_string)
            .collect();

        move |vars: &Variables| {
            let own = names
                .iter()
                .map(|name| Some((name.clone(), vars.get(name)?.clone())))
                .collect::<Option<Variables>>()?;
            Some(memo.intern(index, &kind, own))
        }
    }

    fn len(&self) -> usize {
        self.0.borrow().len()
    }
}

fn cache_key(vars: &Variables) -> String {
    vars.iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join("/")
}

/// A [`Patterns`] registry installed from a [`RouteConfig`].
pub struct RouteTable {
    patterns: Patterns<Record>,
    routes: Vec<InstalledRoute>,
    root: Rc<Record>,
    memo: Memo,
}

impl RouteTable {
    /// Install every route that can be installed.
    ///
    /// Routes that fail (bad pattern, unknown converter, conflict with an
    /// earlier route) are skipped and reported; the rest still install.
    pub fn build(config: &RouteConfig) -> (Self, RouteDiagnostics) {
        let mut diagnostics = RouteDiagnostics::new();
        let mut patterns: Patterns<Record> = Patterns::new();
        let memo = Memo::default();

        for name in &config.converters {
            match builtin(name) {
                Some(converter) => patterns.register_shared_converter(name, converter),
                None => diagnostics.push_error(
                    RouteDiagnostic::new("converters", format!("unknown converter `{name}`"))
                        .with_hint(format!("available converters: {INT}, {FLOAT}")),
                ),
            }
        }

        let mut routes = Vec::with_capacity(config.routes.len());
        let mut located: FxHashMap<&str, usize> = FxHashMap::default();

        for (index, entry) in config.routes.iter().enumerate() {
            let field = format!("route[{index}] `{}`", entry.pattern);

            let steps = match patterns.validate(&entry.pattern) {
                Ok(steps) => steps,
                Err(err) => {
                    diagnostics.push_error(diagnose(field, &err));
                    continue;
                }
            };

            let lookup = memo.lookup(index, &entry.kind, &steps);
            let result = if entry.locate {
                patterns.pattern(&entry.kind, &entry.pattern, lookup, |record: &Record| {
                    Some(record.vars.clone())
                })
            } else {
                patterns.register(&entry.pattern, lookup)
            };
            if let Err(err) = result {
                diagnostics.push_error(diagnose(field, &err));
                continue;
            }

            if entry.locate
                && let Some(previous) = located.insert(entry.kind.as_str(), index)
            {
                diagnostics.warn(
                    field,
                    format!(
                        "kind `{}` is already located by route[{previous}], this route replaces it",
                        entry.kind
                    ),
                );
            }

            debug!("register"; "route[{}] `{}` -> {}", index, render_pattern(&steps), entry.kind);
            routes.push(InstalledRoute {
                index,
                pattern: render_pattern(&steps),
                kind: entry.kind.clone(),
                locate: entry.locate,
                steps,
            });
        }

        let table = Self {
            patterns,
            routes,
            root: Record::root(),
            memo,
        };
        (table, diagnostics)
    }

    /// Install the routes, failing if any route could not be installed.
    pub fn from_config(config: &RouteConfig) -> Result<Self, ConfigError> {
        let (table, diagnostics) = Self::build(config);
        diagnostics.print_warnings();
        diagnostics
            .into_result()
            .map_err(ConfigError::Diagnostics)?;
        Ok(table)
    }

    pub fn patterns(&self) -> &Patterns<Record> {
        &self.patterns
    }

    pub fn routes(&self) -> &[InstalledRoute] {
        &self.routes
    }

    /// The record every path is resolved from.
    pub fn root(&self) -> &Rc<Record> {
        &self.root
    }

    /// Number of distinct records created by lookups so far.
    pub fn interned(&self) -> usize {
        self.memo.len()
    }

    pub fn resolve(&self, path: &str) -> Result<Rc<Record>, ResolutionError> {
        self.patterns.resolve(&self.root, path)
    }

    pub fn consume(&self, path: &str) -> Consumed<Record> {
        self.patterns.consume(&self.root, path)
    }

    pub fn path(&self, record: &Rc<Record>) -> Result<String, LocationError> {
        self.patterns.path(&self.root, record)
    }

    /// Route that locates `kind` (the last one registered for it).
    pub fn locating(&self, kind: &str) -> Option<&InstalledRoute> {
        self.routes
            .iter()
            .rev()
            .find(|route| route.locate && route.kind == kind)
    }

    /// Build the record of `kind` from raw `name=value` pairs.
    ///
    /// Values go through the converters of the locating route's pattern.
    /// The record is the same object resolving its path would produce.
    pub fn record(&self, kind: &str, raw: &[(String, String)]) -> Result<Rc<Record>, RecordError> {
        let route = self.locating(kind).ok_or_else(|| RecordError::UnknownKind {
            kind: kind.to_string(),
        })?;

        if let Some((name, _)) = raw
            .iter()
            .find(|(name, _)| !route.variables().any(|var| var == name.as_str()))
        {
            return Err(RecordError::UnknownVariable {
                pattern: route.pattern.clone(),
                variable: name.clone(),
            });
        }

        let mut vars = Variables::new();
        for step in &route.steps {
            let Step::Variable { name, converter } = step else {
                continue;
            };
            // Later pairs win over earlier ones.
            let text = raw
                .iter()
                .rev()
                .find(|(raw_name, _)| raw_name == name)
                .map(|(_, value)| value)
                .ok_or_else(|| RecordError::MissingVariable {
                    pattern: route.pattern.clone(),
                    variable: name.clone(),
                })?;
            let value = self
                .patterns
                .converters()
                .apply(converter.as_deref(), text)
                .ok_or_else(|| RecordError::Conversion {
                    variable: name.clone(),
                    value: text.clone(),
                    converter: converter.clone().unwrap_or_default(),
                })?;
            vars.insert(name.clone(), value);
        }

        Ok(self.memo.intern(route.index, &route.kind, vars))
    }
}

/// Turn a registration failure into a diagnostic with a fix hint.
fn diagnose(field: String, err: &Error) -> RouteDiagnostic {
    let diagnostic = RouteDiagnostic::new(field, err.to_string());
    match err {
        Error::Registration(RegistrationError::UnknownConverter { converter, .. })
            if builtin(converter).is_some() =>
        {
            diagnostic.with_hint(format!("enable it with `converters = [\"{converter}\"]`"))
        }
        Error::Registration(RegistrationError::VariableConflict { existing, .. }) => {
            diagnostic.with_hint(format!("bind `{existing}` at this position"))
        }
        _ => diagnostic,
    }
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RouteEntry;
    use crate::core::Value;

    fn config(routes: &[(&str, &str)]) -> RouteConfig {
        RouteConfig {
            routes: routes
                .iter()
                .map(|(pattern, kind)| RouteEntry::new(*pattern, *kind))
                .collect(),
            ..RouteConfig::default()
        }
    }

    fn company() -> RouteTable {
        let (table, diagnostics) = RouteTable::build(&config(&[
            ("departments/$department_id", "department"),
            (
                "departments/$department_id/employees/$employee_id:int",
                "employee",
            ),
        ]));
        assert!(!diagnostics.has_errors());
        table
    }

    fn raw(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn test_resolve_records() {
        let table = company();
        let employee = table.resolve("departments/1/employees/10").unwrap();

        assert_eq!(employee.kind, "employee");
        assert_eq!(employee.vars["department_id"], Value::from("1"));
        assert_eq!(employee.vars["employee_id"], Value::Int(10));

        let department = table.patterns().parent_of(&employee).unwrap();
        assert!(department.is_placeholder());
        let department = table.patterns().parent_of(&department).unwrap();
        assert_eq!(department.kind, "department");
        assert!(!department.vars.contains_key("employee_id"));

        let lineage = table.patterns().lineage(&employee);
        assert!(Rc::ptr_eq(lineage.last().unwrap(), table.root()));
    }

    #[test]
    fn test_resolve_twice_is_same_record() {
        let table = company();
        let first = table.resolve("departments/1/employees/10").unwrap();
        let second = table.resolve("/departments/1/employees/10/").unwrap();

        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(table.interned(), 2);
    }

    #[test]
    fn test_path_round_trip() {
        let table = company();
        let employee = table.resolve("departments/1/employees/10").unwrap();
        assert_eq!(table.path(&employee).unwrap(), "departments/1/employees/10");
    }

    #[test]
    fn test_record_locates_like_resolve() {
        let table = company();
        let built = table
            .record("employee", &raw(&[("department_id", "1"), ("employee_id", "10")]))
            .unwrap();
        assert_eq!(table.path(&built).unwrap(), "departments/1/employees/10");

        let resolved = table.resolve("departments/1/employees/10").unwrap();
        assert!(Rc::ptr_eq(&built, &resolved));
    }

    #[test]
    fn test_record_errors() {
        let table = company();

        assert!(matches!(
            table.record("project", &[]),
            Err(RecordError::UnknownKind { .. })
        ));
        assert!(matches!(
            table.record("employee", &raw(&[("department_id", "1")])),
            Err(RecordError::MissingVariable { variable, .. }) if variable == "employee_id"
        ));
        assert!(matches!(
            table.record("department", &raw(&[("department_id", "1"), ("x", "2")])),
            Err(RecordError::UnknownVariable { variable, .. }) if variable == "x"
        ));
        assert!(matches!(
            table.record("employee", &raw(&[("department_id", "1"), ("employee_id", "ten")])),
            Err(RecordError::Conversion { converter, .. }) if converter == "int"
        ));
    }

    #[test]
    fn test_unlocated_route_has_no_record() {
        let mut cfg = config(&[("models/$name", "model")]);
        cfg.routes[0].locate = false;
        let (table, _) = RouteTable::build(&cfg);

        assert!(table.resolve("models/a").is_ok());
        assert!(table.locating("model").is_none());
        assert!(table.patterns().inverse_kinds().is_empty());
    }

    #[test]
    fn test_diagnostics_collect_every_failure() {
        let (table, diagnostics) = RouteTable::build(&config(&[
            ("a/$x", "a"),
            ("a/$y/b", "b"),
            ("c/$z:float", "c"),
            ("d/$w", "d"),
        ]));

        assert_eq!(diagnostics.len(), 2);
        let errors = diagnostics.errors();
        assert!(errors[0].field.starts_with("route[1]"));
        assert!(errors[0].hint.as_deref().unwrap().contains("$x"));
        assert!(errors[1].field.starts_with("route[2]"));
        assert!(errors[1].hint.as_deref().unwrap().contains("converters"));

        let installed: Vec<_> = table.routes().iter().map(|r| r.index).collect();
        assert_eq!(installed, vec![0, 3]);
    }

    #[test]
    fn test_enable_float() {
        let mut cfg = config(&[("points/$x:float", "point")]);
        cfg.converters = vec!["float".to_string()];
        let (table, diagnostics) = RouteTable::build(&cfg);

        assert!(!diagnostics.has_errors());
        let point = table.resolve("points/1.5").unwrap();
        assert_eq!(point.vars["x"].as_float(), Some(1.5));
    }

    #[test]
    fn test_unknown_builtin_converter() {
        let mut cfg = config(&[]);
        cfg.converters = vec!["uuid".to_string()];
        let (_, diagnostics) = RouteTable::build(&cfg);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics.errors()[0].field, "converters");
    }

    #[test]
    fn test_duplicate_locating_kind_warns() {
        let (table, diagnostics) =
            RouteTable::build(&config(&[("a/$x", "item"), ("b/$x", "item")]));

        assert!(!diagnostics.has_errors());
        assert_eq!(diagnostics.warnings().len(), 1);
        assert_eq!(table.locating("item").unwrap().index, 1);
        assert_eq!(table.patterns().inverse_pattern("item").unwrap(), "b/$x");
    }

    #[test]
    fn test_from_config_fails_on_errors() {
        let err = RouteTable::from_config(&config(&[("a/$x", "a"), ("a/$y", "b")]))
            .err()
            .unwrap();
        assert!(matches!(err, ConfigError::Diagnostics(d) if d.len() == 1));
    }
}
