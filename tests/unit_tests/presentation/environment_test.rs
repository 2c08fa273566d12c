use std::collections::HashMap;

use ai_doctor::presentation::config::{ENVIRONMENT_VARIABLE, Environment};

#[test]
fn given_no_variable_when_resolving_environment_then_defaults_to_local() {
    assert_eq!(Environment::from_vars(&HashMap::new()), Ok(Environment::Local));
}

#[test]
fn given_production_alias_when_resolving_environment_then_prod() {
    let vars = HashMap::from([(ENVIRONMENT_VARIABLE.to_string(), "Production".to_string())]);

    let environment = Environment::from_vars(&vars).unwrap();

    assert_eq!(environment, Environment::Prod);
    assert!(environment.is_production());
}

#[test]
fn given_unknown_value_when_resolving_environment_then_error() {
    let result = Environment::try_from("staging".to_string());

    assert!(result.unwrap_err().contains("staging"));
}
