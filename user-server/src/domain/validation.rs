//! Field rules for user write requests.
//!
//! Raw JSON values are first checked for the right shape (string, integer)
//! and then handed to `garde` for the format and range rules. Every violated
//! field yields exactly one [`FieldError`], reported in declaration order.

use garde::Validate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::domain::user::{NewUser, UserChanges};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    Name,
    Email,
    Age,
}

impl Field {
    pub const fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Age => "age",
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            Field::Name => "Name must be a string",
            Field::Email => "Please provide a valid email",
            Field::Age => "Age must be a positive integer",
        }
    }

    fn from_path(path: &str) -> Option<Self> {
        match path {
            "name" => Some(Field::Name),
            "email" => Some(Field::Email),
            "age" => Some(Field::Age),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: Field) -> Self {
        Self {
            field: field.as_str(),
            message: field.message().to_owned(),
        }
    }

    /// Error for the request body as a whole, e.g. malformed JSON.
    pub fn body(message: impl Into<String>) -> Self {
        Self {
            field: "body",
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Optional,
}

/// Untyped request fields. An explicit `null` is kept as `Some(Value::Null)`
/// so it is validated instead of being mistaken for an omitted key.
#[derive(Debug, Default)]
pub struct RawUserFields {
    pub name: Option<Value>,
    pub email: Option<Value>,
    pub age: Option<Value>,
}

/// Only a JSON object is accepted; arrays and scalars are rejected instead of
/// being mapped onto the fields by position.
impl<'de> Deserialize<'de> for RawUserFields {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut object = Map::<String, Value>::deserialize(deserializer)?;
        Ok(Self {
            name: object.remove("name"),
            email: object.remove("email"),
            age: object.remove("age"),
        })
    }
}

#[derive(Debug, Default, Validate)]
struct CheckedFields {
    #[garde(skip)]
    name: Option<String>,
    #[garde(email)]
    email: Option<String>,
    #[garde(range(min = 0))]
    age: Option<i64>,
}

impl RawUserFields {
    pub fn into_new_user(self) -> Result<NewUser, Vec<FieldError>> {
        let checked = self.check(Presence::Required)?;
        match (checked.name, checked.email, checked.age) {
            (Some(name), Some(email), Some(age)) => Ok(NewUser { name, email, age }),
            // `check` has already reported every missing field under
            // `Presence::Required`; this arm only keeps the conversion total.
            (name, email, age) => Err([
                (Field::Name, name.is_none()),
                (Field::Email, email.is_none()),
                (Field::Age, age.is_none()),
            ]
            .into_iter()
            .filter(|(_, missing)| *missing)
            .map(|(field, _)| FieldError::new(field))
            .collect()),
        }
    }

    pub fn into_changes(self) -> Result<UserChanges, Vec<FieldError>> {
        let checked = self.check(Presence::Optional)?;
        Ok(UserChanges {
            name: checked.name,
            email: checked.email,
            age: checked.age,
        })
    }

    fn check(self, presence: Presence) -> Result<CheckedFields, Vec<FieldError>> {
        let mut violations = Vec::new();

        let checked = CheckedFields {
            name: shape(Field::Name, self.name, presence, &mut violations, string_value),
            email: shape(Field::Email, self.email, presence, &mut violations, string_value),
            age: shape(Field::Age, self.age, presence, &mut violations, integer_value),
        };

        if let Err(report) = checked.validate() {
            for (path, _) in report.iter() {
                if let Some(field) = Field::from_path(&path.to_string()) {
                    violations.push(field);
                }
            }
        }
        if checked.email.as_deref().is_some_and(|email| !has_tld(email)) {
            violations.push(Field::Email);
        }

        if violations.is_empty() {
            return Ok(checked);
        }

        violations.sort();
        violations.dedup();
        Err(violations.into_iter().map(FieldError::new).collect())
    }
}

fn shape<T>(
    field: Field,
    value: Option<Value>,
    presence: Presence,
    violations: &mut Vec<Field>,
    convert: fn(Value) -> Option<T>,
) -> Option<T> {
    match value {
        Some(value) => {
            let converted = convert(value);
            if converted.is_none() {
                violations.push(field);
            }
            converted
        }
        None => {
            if presence == Presence::Required {
                violations.push(field);
            }
            None
        }
    }
}

fn string_value(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        _ => None,
    }
}

fn integer_value(value: Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|float| float.fract() == 0.0 && float.abs() < i64::MAX as f64)
                .map(|float| float as i64)
        }),
        Value::String(text) => text.parse().ok(),
        _ => None,
    }
}

/// `garde`'s email rule accepts bare hosts such as `ada@localhost`; addresses
/// must also end in a dotted domain with an alphabetic (or punycode) TLD.
fn has_tld(email: &str) -> bool {
    let Some((_, domain)) = email.rsplit_once('@') else {
        return false;
    };
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty()
        && !host.split('.').any(str::is_empty)
        && tld.len() >= 2
        && (tld.chars().all(char::is_alphabetic) || tld.starts_with("xn--"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn raw(value: Value) -> RawUserFields {
        serde_json::from_value(value).unwrap()
    }

    fn fields(errors: &[FieldError]) -> Vec<&'static str> {
        errors.iter().map(|err| err.field).collect()
    }

    #[test]
    fn accepts_a_complete_record() {
        let user = raw(json!({ "name": "Ada", "email": "ada@example.com", "age": 36 }))
            .into_new_user()
            .unwrap();

        assert_eq!(
            user,
            NewUser {
                name: "Ada".into(),
                email: "ada@example.com".into(),
                age: 36,
            }
        );
    }

    #[rstest]
    #[case(json!({ "email": "ada@example.com", "age": 36 }), vec!["name"])]
    #[case(json!({ "name": 42, "email": "ada@example.com", "age": 36 }), vec!["name"])]
    #[case(json!({ "name": null, "email": "ada@example.com", "age": 36 }), vec!["name"])]
    #[case(json!({ "name": "Ada", "email": "not-an-email", "age": 36 }), vec!["email"])]
    #[case(json!({ "name": "Ada", "email": 7, "age": 36 }), vec!["email"])]
    #[case(json!({ "name": "Ada", "email": "ada@localhost", "age": 36 }), vec!["email"])]
    #[case(json!({ "name": "Ada", "email": "ada@example.c", "age": 36 }), vec!["email"])]
    #[case(json!({ "name": "Ada", "email": "ada@example.com", "age": -1 }), vec!["age"])]
    #[case(json!({ "name": "Ada", "email": "ada@example.com", "age": 36.5 }), vec!["age"])]
    #[case(json!({ "name": "Ada", "email": "ada@example.com", "age": "old" }), vec!["age"])]
    #[case(json!({ "name": "Ada", "email": "ada@example.com", "age": " 30 " }), vec!["age"])]
    #[case(json!({}), vec!["name", "email", "age"])]
    #[case(json!({ "name": [], "email": "x", "age": -3 }), vec!["name", "email", "age"])]
    fn reports_one_error_per_violated_field(#[case] body: Value, #[case] expected: Vec<&str>) {
        let errors = raw(body).into_new_user().unwrap_err();

        assert_eq!(fields(&errors), expected);
    }

    #[rstest]
    #[case(json!(0), 0)]
    #[case(json!(18), 18)]
    #[case(json!(30.0), 30)]
    #[case(json!("42"), 42)]
    fn age_accepts_integer_like_values(#[case] age: Value, #[case] expected: i64) {
        let user = raw(json!({ "name": "Ada", "email": "ada@example.com", "age": age }))
            .into_new_user()
            .unwrap();

        assert_eq!(user.age, expected);
    }

    #[rstest]
    #[case("ada@example.com")]
    #[case("grace.hopper@mail.navy.mil")]
    #[case("ada@example.co.uk")]
    fn email_accepts_dotted_domains(#[case] email: &str) {
        let user = raw(json!({ "name": "Ada", "email": email, "age": 36 }))
            .into_new_user()
            .unwrap();

        assert_eq!(user.email, email);
    }

    #[rstest]
    #[case(json!(["Ada", "ada@example.com", 36]))]
    #[case(json!("Ada"))]
    #[case(json!(36))]
    #[case(Value::Null)]
    fn only_objects_are_accepted_as_fields(#[case] body: Value) {
        assert!(serde_json::from_value::<RawUserFields>(body).is_err());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let fields = raw(json!({ "age": 3, "nickname": "ada" }));

        assert_eq!(fields.age, Some(json!(3)));
        assert!(fields.name.is_none());
    }

    #[test]
    fn error_messages_are_human_readable() {
        let errors = raw(json!({ "name": 1, "email": "bad", "age": "x" }))
            .into_new_user()
            .unwrap_err();

        let messages: Vec<_> = errors.iter().map(|err| err.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Name must be a string",
                "Please provide a valid email",
                "Age must be a positive integer",
            ]
        );
    }

    #[test]
    fn partial_update_skips_absent_fields() {
        let changes = raw(json!({ "age": 40 })).into_changes().unwrap();

        assert_eq!(
            changes,
            UserChanges {
                age: Some(40),
                ..UserChanges::default()
            }
        );
    }

    #[test]
    fn partial_update_still_checks_present_fields() {
        let errors = raw(json!({ "email": "nope", "age": -5 }))
            .into_changes()
            .unwrap_err();

        assert_eq!(fields(&errors), vec!["email", "age"]);
    }

    #[test]
    fn empty_update_is_valid() {
        let changes = raw(json!({})).into_changes().unwrap();
        assert!(changes.is_empty());
    }
}
