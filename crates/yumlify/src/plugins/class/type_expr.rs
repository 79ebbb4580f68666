//! Type expression parser using chumsky
//!
//! Parses the type references written in model files: a bare name such as
//! `String`, or a constructed generic such as `Dictionary<String, List<Dog>>`.

use chumsky::prelude::*;

use crate::core::DiagramError;

/// A parsed type reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeExpr {
    pub name: String,
    pub arguments: Vec<TypeExpr>,
}

impl TypeExpr {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
        }
    }

    pub fn is_generic(&self) -> bool {
        !self.arguments.is_empty()
    }
}

/// Parse a complete type expression
pub fn parse_type_expr(input: &str) -> Result<TypeExpr, DiagramError> {
    type_expr_parser()
        .then_ignore(end())
        .parse(input)
        .into_result()
        .map_err(|errors| DiagramError::type_expression_error(describe_errors(&errors), input))
}

/// `found '>' expected ... at 5`, one entry per error
fn describe_errors(errors: &[Rich<'_, char>]) -> String {
    errors
        .iter()
        .map(|e| format!("{} at {}", e, e.span().start))
        .collect::<Vec<_>>()
        .join("; ")
}

fn type_expr_parser<'src>(
) -> impl Parser<'src, &'src str, TypeExpr, extra::Err<Rich<'src, char>>> + Clone {
    recursive(|expr| {
        let name = none_of("<>, \t\r\n")
            .repeated()
            .at_least(1)
            .to_slice()
            .map(|s: &str| s.to_string());

        let arguments = expr
            .separated_by(just(',').padded())
            .at_least(1)
            .collect::<Vec<TypeExpr>>()
            .delimited_by(just('<').padded(), just('>'));

        name.then(arguments.or_not())
            .map(|(name, arguments)| TypeExpr {
                name,
                arguments: arguments.unwrap_or_default(),
            })
            .padded()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_name() {
        assert_eq!(parse_type_expr("String").unwrap(), TypeExpr::named("String"));
        assert_eq!(parse_type_expr("  Int32 ").unwrap(), TypeExpr::named("Int32"));
    }

    #[test]
    fn test_generic() {
        let expr = parse_type_expr("List<Dog>").unwrap();
        assert_eq!(expr.name, "List");
        assert_eq!(expr.arguments, vec![TypeExpr::named("Dog")]);
    }

    #[test]
    fn test_nested_generic() {
        let expr = parse_type_expr("Dictionary<String, List<Dog>>").unwrap();
        assert_eq!(expr.name, "Dictionary");
        assert_eq!(expr.arguments.len(), 2);
        assert_eq!(expr.arguments[1].name, "List");
        assert_eq!(expr.arguments[1].arguments, vec![TypeExpr::named("Dog")]);
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(parse_type_expr("").is_err());
        assert!(parse_type_expr("List<Dog").is_err());
        assert!(parse_type_expr("List<>").is_err());
        assert!(parse_type_expr("A B").is_err());
    }

    #[test]
    fn test_error_reports_position() {
        let err = parse_type_expr("List<Dog").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("end of input"), "{message}");
        assert!(message.contains("at 8"), "{message}");
        assert!(message.ends_with("in `List<Dog`"), "{message}");
    }
}
