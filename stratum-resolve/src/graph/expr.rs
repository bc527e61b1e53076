//! Declared type expressions.

use std::fmt;

/// A parsed declared-type string such as `Cat`, `integer[]`, `Cat | Dog`
/// or `lib.Cat`.
///
/// Parsing never fails. Malformed input (e.g. `"A |"` or `"[]"`) produces
/// an expression with an empty name, which [`TypeExpr::has_empty_name`]
/// reports so the caller can decide what to do with it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeExpr {
    /// A bare name: a scalar keyword or a type reference.
    Named(String),
    /// A dotted reference into a library namespace.
    Qualified { namespace: String, name: String },
    /// `T[]`
    Array(Box<TypeExpr>),
    /// `T{}`
    Map(Box<TypeExpr>),
    /// `A | B | ...`
    Union(Vec<TypeExpr>),
}

impl TypeExpr {
    /// Parse a declared-type string.
    ///
    /// Precedence: array suffix, map suffix, union separator, namespace dot,
    /// bare name. A fully parenthesized expression is unwrapped first.
    pub fn parse(text: &str) -> Self {
        let text = strip_parens(text.trim());

        if let Some(inner) = text.strip_suffix("[]") {
            return TypeExpr::Array(Box::new(Self::parse(inner)));
        }
        if let Some(inner) = text.strip_suffix("{}") {
            return TypeExpr::Map(Box::new(Self::parse(inner)));
        }

        let members = split_top_level(text, '|');
        if members.len() > 1 {
            return TypeExpr::Union(members.into_iter().map(Self::parse).collect());
        }

        if let Some((namespace, name)) = text.rsplit_once('.') {
            return TypeExpr::Qualified {
                namespace: namespace.trim().to_string(),
                name: name.trim().to_string(),
            };
        }

        TypeExpr::Named(text.to_string())
    }

    /// Shorthand for a bare name.
    pub fn named(name: impl Into<String>) -> Self {
        TypeExpr::Named(name.into())
    }

    /// The referenced name for `Named` and `Qualified` expressions
    /// (the last segment of a dotted reference).
    pub fn bare_name(&self) -> Option<&str> {
        match self {
            TypeExpr::Named(name) | TypeExpr::Qualified { name, .. } => Some(name),
            TypeExpr::Array(_) | TypeExpr::Map(_) | TypeExpr::Union(_) => None,
        }
    }

    pub fn is_union(&self) -> bool {
        matches!(self, TypeExpr::Union(_))
    }

    /// All `Named` and `Qualified` leaves, left to right.
    pub fn leaves(&self) -> Vec<&TypeExpr> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a TypeExpr>) {
        match self {
            TypeExpr::Named(_) | TypeExpr::Qualified { .. } => out.push(self),
            TypeExpr::Array(inner) | TypeExpr::Map(inner) => inner.collect_leaves(out),
            TypeExpr::Union(members) => {
                for member in members {
                    member.collect_leaves(out);
                }
            }
        }
    }

    /// Every type name the expression mentions, including array elements
    /// and union members.
    pub fn referenced_names(&self) -> Vec<&str> {
        self.leaves()
            .into_iter()
            .filter_map(TypeExpr::bare_name)
            .collect()
    }

    /// Returns true if any name in the expression is empty.
    pub fn has_empty_name(&self) -> bool {
        self.leaves().into_iter().any(|leaf| match leaf {
            TypeExpr::Named(name) => name.is_empty(),
            TypeExpr::Qualified { namespace, name } => namespace.is_empty() || name.is_empty(),
            _ => false,
        })
    }

    /// Members of a union with nested unions flattened, looking through
    /// array and map suffixes (`(Cat | Dog)[]` has members `Cat` and `Dog`).
    pub fn union_variants(&self) -> Option<Vec<&TypeExpr>> {
        match self {
            TypeExpr::Union(_) => {
                let mut out = Vec::new();
                self.flatten_union(&mut out);
                Some(out)
            }
            TypeExpr::Array(inner) | TypeExpr::Map(inner) => inner.union_variants(),
            TypeExpr::Named(_) | TypeExpr::Qualified { .. } => None,
        }
    }

    fn flatten_union<'a>(&'a self, out: &mut Vec<&'a TypeExpr>) {
        match self {
            TypeExpr::Union(members) => {
                for member in members {
                    member.flatten_union(out);
                }
            }
            _ => out.push(self),
        }
    }

    /// Referenced names of [`TypeExpr::union_variants`]; array-typed
    /// variants are skipped.
    pub fn union_members(&self) -> Option<Vec<&str>> {
        self.union_variants()
            .map(|variants| variants.into_iter().filter_map(TypeExpr::bare_name).collect())
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Named(name) => f.write_str(name),
            TypeExpr::Qualified { namespace, name } => write!(f, "{}.{}", namespace, name),
            TypeExpr::Array(inner) if inner.is_union() => write!(f, "({})[]", inner),
            TypeExpr::Array(inner) => write!(f, "{}[]", inner),
            TypeExpr::Map(inner) if inner.is_union() => write!(f, "({}){{}}", inner),
            TypeExpr::Map(inner) => write!(f, "{}{{}}", inner),
            TypeExpr::Union(members) => {
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    if member.is_union() {
                        write!(f, "({})", member)?;
                    } else {
                        write!(f, "{}", member)?;
                    }
                }
                Ok(())
            }
        }
    }
}

/// Remove parentheses that wrap the whole expression.
fn strip_parens(mut text: &str) -> &str {
    while text.starts_with('(') && text.ends_with(')') && closes_at_end(text) {
        text = text[1..text.len() - 1].trim();
    }
    text
}

/// Returns true if the opening paren at index 0 is closed by the last character.
fn closes_at_end(text: &str) -> bool {
    let mut depth = 0usize;
    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return i == text.len() - 1;
                }
            }
            _ => {}
        }
    }
    false
}

/// Split on `sep` outside of parentheses.
fn split_top_level(text: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if c == sep && depth == 0 => {
                parts.push(&text[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> TypeExpr {
        TypeExpr::named(name)
    }

    #[test]
    fn test_parse_named() {
        assert_eq!(TypeExpr::parse(" Cat "), named("Cat"));
        assert_eq!(TypeExpr::parse("date-only"), named("date-only"));
    }

    #[test]
    fn test_parse_array_and_map() {
        assert_eq!(
            TypeExpr::parse("integer[]"),
            TypeExpr::Array(Box::new(named("integer")))
        );
        assert_eq!(
            TypeExpr::parse("Cat[][]"),
            TypeExpr::Array(Box::new(TypeExpr::Array(Box::new(named("Cat")))))
        );
        assert_eq!(
            TypeExpr::parse("string{}"),
            TypeExpr::Map(Box::new(named("string")))
        );
    }

    #[test]
    fn test_parse_union() {
        assert_eq!(
            TypeExpr::parse("Cat | Dog"),
            TypeExpr::Union(vec![named("Cat"), named("Dog")])
        );
    }

    #[test]
    fn test_array_suffix_binds_before_union() {
        assert_eq!(
            TypeExpr::parse("Cat | Dog[]"),
            TypeExpr::Array(Box::new(TypeExpr::Union(vec![named("Cat"), named("Dog")])))
        );
        assert_eq!(
            TypeExpr::parse("(Cat | Dog)[] | Bird"),
            TypeExpr::Union(vec![
                TypeExpr::Array(Box::new(TypeExpr::Union(vec![named("Cat"), named("Dog")]))),
                named("Bird"),
            ])
        );
    }

    #[test]
    fn test_parse_qualified() {
        assert_eq!(
            TypeExpr::parse("zoo.pets.Cat"),
            TypeExpr::Qualified {
                namespace: "zoo.pets".into(),
                name: "Cat".into(),
            }
        );
    }

    #[test]
    fn test_parse_parenthesized() {
        assert_eq!(TypeExpr::parse("((Cat))"), named("Cat"));
        // Two groups: the outer parens do not wrap the whole expression
        assert_eq!(
            TypeExpr::parse("(A) | (B)"),
            TypeExpr::Union(vec![named("A"), named("B")])
        );
    }

    #[test]
    fn test_display_is_canonical() {
        for text in ["Cat", "integer[]", "Cat | Dog", "(Cat | Dog)[]", "lib.Cat", "string{}"] {
            assert_eq!(TypeExpr::parse(text).to_string(), text);
        }
        assert_eq!(TypeExpr::parse("  Cat|Dog ").to_string(), "Cat | Dog");
    }

    #[test]
    fn test_referenced_names() {
        let expr = TypeExpr::parse("(Cat | lib.Dog)[] | Bird");
        assert_eq!(expr.referenced_names(), vec!["Cat", "Dog", "Bird"]);
    }

    #[test]
    fn test_empty_names() {
        assert!(TypeExpr::parse("A |").has_empty_name());
        assert!(TypeExpr::parse("[]").has_empty_name());
        assert!(TypeExpr::parse("lib.").has_empty_name());
        assert!(!TypeExpr::parse("A | B").has_empty_name());
    }

    #[test]
    fn test_union_members() {
        assert_eq!(
            TypeExpr::parse("Cat | Dog").union_members(),
            Some(vec!["Cat", "Dog"])
        );
        assert_eq!(
            TypeExpr::parse("(Cat | Dog)[]").union_members(),
            Some(vec!["Cat", "Dog"])
        );
        assert_eq!(TypeExpr::parse("Cat").union_members(), None);
    }

    #[test]
    fn test_nested_unions_flatten() {
        assert_eq!(
            TypeExpr::parse("(A | B) | C").union_members(),
            Some(vec!["A", "B", "C"])
        );
        assert_eq!(
            TypeExpr::parse("(A | (B | lib.C)){}").union_members(),
            Some(vec!["A", "B", "C"])
        );

        let expr = TypeExpr::parse("(Cat | Dog)[] | Bird");
        let variants: Vec<String> = expr
            .union_variants()
            .unwrap()
            .into_iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(variants, vec!["(Cat | Dog)[]", "Bird"]);
        assert_eq!(expr.union_members(), Some(vec!["Bird"]));
    }
}
