//! Registration-time conflict detection.
//!
//! A new pattern conflicts with the registry when, at some shared prefix, it
//! binds a variable whose name or converter differs from the variable edge
//! already present there. Conflicts are found along every prefix, so
//! `a/$x/b` is rejected after `a/$y` even though the two full patterns differ.

use super::trie::Node;
use crate::core::{Converters, Step, render_pattern};
use crate::error::RegistrationError;

/// Check `steps` against the trie without modifying it.
pub(super) fn check_pattern<T>(
    root: &Node<T>,
    steps: &[Step],
    pattern: &str,
    converters: &Converters,
) -> Result<(), RegistrationError> {
    check_converters(steps, pattern, converters)?;

    let mut node = root;
    for (index, step) in steps.iter().enumerate() {
        let next = match step {
            Step::Literal(text) => node.literals.get(text),
            Step::Variable { name, converter } => match node.variable.as_deref() {
                Some(edge) if !edge.matches(name, converter.as_deref()) => {
                    return Err(RegistrationError::VariableConflict {
                        pattern: pattern.to_string(),
                        prefix: render_pattern(&steps[..=index]),
                        existing: edge.step().to_string(),
                    });
                }
                Some(edge) => Some(&edge.node),
                None => None,
            },
        };

        // Past the end of the existing trie nothing else can conflict.
        match next {
            Some(child) => node = child,
            None => break,
        }
    }

    Ok(())
}

/// Every converter named by `steps` must be registered.
fn check_converters(
    steps: &[Step],
    pattern: &str,
    converters: &Converters,
) -> Result<(), RegistrationError> {
    for step in steps {
        if let Step::Variable {
            converter: Some(name),
            ..
        } = step
            && !converters.contains(name)
        {
            return Err(RegistrationError::UnknownConverter {
                pattern: pattern.to_string(),
                converter: name.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parse_pattern;

    fn trie(patterns: &[&str]) -> Node<()> {
        let mut root = Node::root();
        for pattern in patterns {
            root.insert(&parse_pattern(pattern).unwrap());
        }
        root
    }

    fn check(root: &Node<()>, pattern: &str) -> Result<(), RegistrationError> {
        let steps = parse_pattern(pattern).unwrap();
        check_pattern(root, &steps, pattern, &Converters::new())
    }

    #[test]
    fn test_no_conflict() {
        let root = trie(&["a/$x", "a/$x/b", "c"]);
        assert!(check(&root, "a/$x/b/$y").is_ok());
        assert!(check(&root, "a/literal").is_ok());
        assert!(check(&root, "d/$z").is_ok());
    }

    #[test]
    fn test_same_pattern_is_not_a_conflict() {
        let root = trie(&["a/$x"]);
        assert!(check(&root, "a/$x").is_ok());
    }

    #[test]
    fn test_variable_name_conflict() {
        let root = trie(&["a/$x"]);
        let err = check(&root, "a/$y").unwrap_err();
        assert_eq!(
            err,
            RegistrationError::VariableConflict {
                pattern: "a/$y".to_string(),
                prefix: "a/$y".to_string(),
                existing: "$x".to_string(),
            }
        );
    }

    #[test]
    fn test_converter_conflict() {
        let root = trie(&["a/$x"]);
        assert!(matches!(
            check(&root, "a/$x:int"),
            Err(RegistrationError::VariableConflict { .. })
        ));

        let root = trie(&["a/$x:int"]);
        assert!(check(&root, "a/$x").is_err());
    }

    #[test]
    fn test_conflict_through_longer_pattern() {
        let root = trie(&["a/$x/b/$y"]);
        let err = check(&root, "a/$x/b/$z/c").unwrap_err();
        match err {
            RegistrationError::VariableConflict { prefix, existing, .. } => {
                assert_eq!(prefix, "a/$x/b/$z");
                assert_eq!(existing, "$y");
            }
            other => panic!("expected VariableConflict, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_converter() {
        let root = trie(&[]);
        assert_eq!(
            check(&root, "a/$x:float"),
            Err(RegistrationError::UnknownConverter {
                pattern: "a/$x:float".to_string(),
                converter: "float".to_string(),
            })
        );
    }
}
