//! Self-parameter predicates.

use tsg_ir::sema::TypeParamSymbol;

use crate::config::Config;

/// Name strategy: the parameter is spelled like the configured name,
/// ignoring ASCII case.
pub fn is_valid_name(param: &TypeParamSymbol, config: &Config) -> bool {
    config.param_name_enable && config.param_name.eq_ignore_ascii_case(&param.name)
}

/// Attribute strategy: the parameter carries the configured marker
/// attribute.
pub fn has_valid_attribute(param: &TypeParamSymbol, config: &Config) -> bool {
    config.attribute_enable
        && config
            .attribute_symbol
            .is_some_and(|attribute| param.attributes.contains(&attribute))
}

pub fn is_self_parameter(param: &TypeParamSymbol, config: &Config) -> bool {
    is_valid_name(param, config) || has_valid_attribute(param, config)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use smallvec::smallvec;
    use tsg_ir::{TypeId, TypeParamId};

    use super::*;

    fn param(name: &str, attributes: &[TypeId]) -> TypeParamSymbol {
        TypeParamSymbol {
            id: TypeParamId::new(0),
            owner: TypeId::new(0),
            ordinal: 0,
            name: name.to_string(),
            attributes: attributes.iter().copied().collect(),
            locations: Vec::new(),
        }
    }

    fn attribute_config(symbol: Option<TypeId>) -> Config {
        Config {
            param_name_enable: false,
            attribute_enable: true,
            attribute_symbol: symbol,
            ..Config::default()
        }
    }

    #[test]
    fn test_name_match_is_case_insensitive() {
        let config = Config::default();
        assert!(is_valid_name(&param("tself", &[]), &config));
        assert!(is_valid_name(&param("TSELF", &[]), &config));
        assert!(!is_valid_name(&param("T", &[]), &config));
        assert!(!is_valid_name(&param("TSelf2", &[]), &config));
    }

    #[test]
    fn test_name_strategy_disabled() {
        let config = Config {
            param_name_enable: false,
            ..Config::default()
        };
        assert!(!is_self_parameter(&param("TSelf", &[]), &config));
    }

    #[test]
    fn test_attribute_match_by_symbol() {
        let marker = TypeId::new(7);
        let config = attribute_config(Some(marker));
        assert!(has_valid_attribute(&param("T", &[marker]), &config));
        assert!(has_valid_attribute(&param("T", &[TypeId::new(1), marker]), &config));
        assert!(!has_valid_attribute(&param("T", &[TypeId::new(1)]), &config));
        assert!(!has_valid_attribute(&param("TSelf", &[]), &config));
    }

    #[test]
    fn test_unresolved_attribute_never_matches() {
        let config = attribute_config(None);
        assert!(!has_valid_attribute(&param("T", &[TypeId::new(7)]), &config));
    }

    #[test]
    fn test_attribute_strategy_disabled() {
        let marker = TypeId::new(7);
        let mut p = param("T", &[]);
        p.attributes = smallvec![marker];
        let config = Config {
            attribute_symbol: Some(marker),
            ..Config::default()
        };
        assert!(!has_valid_attribute(&p, &config));
        assert!(!is_self_parameter(&p, &config));
    }

    proptest! {
        #[test]
        fn name_match_ignores_ascii_case(name in "[A-Za-z_][A-Za-z0-9_]{0,12}", upper in any::<bool>()) {
            let config = Config { param_name: name.clone(), ..Config::default() };
            let spelled = if upper { name.to_ascii_uppercase() } else { name.to_ascii_lowercase() };
            prop_assert!(is_valid_name(&param(&spelled, &[]), &config));
        }

        #[test]
        fn different_names_never_match(a in "[a-z]{1,8}", b in "[a-z]{1,8}") {
            prop_assume!(a != b);
            let config = Config { param_name: a, ..Config::default() };
            prop_assert!(!is_valid_name(&param(&b, &[]), &config));
        }
    }
}
