use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// The fixed kinds of value a profile can supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Name,
    FirstName,
    LastName,
    Email,
    Phone,
    Address,
    City,
    State,
    Zip,
    Country,
    Company,
    Username,
    Password,
    Age,
    Message,
}

impl Category {
    pub const ALL: [Category; 15] = [
        Category::Name,
        Category::FirstName,
        Category::LastName,
        Category::Email,
        Category::Phone,
        Category::Address,
        Category::City,
        Category::State,
        Category::Zip,
        Category::Country,
        Category::Company,
        Category::Username,
        Category::Password,
        Category::Age,
        Category::Message,
    ];

    /// The camelCase key used for this category in profile JSON.
    pub fn key(self) -> &'static str {
        match self {
            Category::Name => "name",
            Category::FirstName => "firstName",
            Category::LastName => "lastName",
            Category::Email => "email",
            Category::Phone => "phone",
            Category::Address => "address",
            Category::City => "city",
            Category::State => "state",
            Category::Zip => "zip",
            Category::Country => "country",
            Category::Company => "company",
            Category::Username => "username",
            Category::Password => "password",
            Category::Age => "age",
            Category::Message => "message",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A named set of values used to fill forms.
///
/// Every field is optional. An empty string counts as absent, so a control
/// resolved to a category the profile leaves blank stays unfilled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "string_or_number")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "string_or_number")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "string_or_number")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "string_or_number")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "string_or_number")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "string_or_number")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "string_or_number")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "string_or_number")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "string_or_number")]
    pub zip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "string_or_number")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "string_or_number")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "string_or_number")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "string_or_number")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "string_or_number")]
    pub age: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "string_or_number")]
    pub message: Option<String>,
}

impl Profile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter used by the built-in profiles and tests.
    pub fn with(mut self, category: Category, value: impl Into<String>) -> Self {
        *self.slot_mut(category) = Some(value.into());
        self
    }

    /// Returns the value for a category, or `None` if it is absent or empty.
    pub fn get(&self, category: Category) -> Option<&str> {
        self.slot(category).as_deref().filter(|v| !v.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        Category::ALL.iter().all(|c| self.get(*c).is_none())
    }

    fn slot(&self, category: Category) -> &Option<String> {
        match category {
            Category::Name => &self.name,
            Category::FirstName => &self.first_name,
            Category::LastName => &self.last_name,
            Category::Email => &self.email,
            Category::Phone => &self.phone,
            Category::Address => &self.address,
            Category::City => &self.city,
            Category::State => &self.state,
            Category::Zip => &self.zip,
            Category::Country => &self.country,
            Category::Company => &self.company,
            Category::Username => &self.username,
            Category::Password => &self.password,
            Category::Age => &self.age,
            Category::Message => &self.message,
        }
    }

    fn slot_mut(&mut self, category: Category) -> &mut Option<String> {
        match category {
            Category::Name => &mut self.name,
            Category::FirstName => &mut self.first_name,
            Category::LastName => &mut self.last_name,
            Category::Email => &mut self.email,
            Category::Phone => &mut self.phone,
            Category::Address => &mut self.address,
            Category::City => &mut self.city,
            Category::State => &mut self.state,
            Category::Zip => &mut self.zip,
            Category::Country => &mut self.country,
            Category::Company => &mut self.company,
            Category::Username => &mut self.username,
            Category::Password => &mut self.password,
            Category::Age => &mut self.age,
            Category::Message => &mut self.message,
        }
    }
}

/// Accepts `"30"`, `30`, `true` or `null` for a profile field.
///
/// Falsy scalars (`0`, `false`) and non-scalar values leave the field
/// absent, so one odd value never rejects the whole profile.
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Num(serde_json::Number),
        Bool(bool),
        Other(serde_json::Value),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Str(s)) => Some(s),
        Some(Raw::Num(n)) if n.as_f64() == Some(0.0) => None,
        Some(Raw::Num(n)) => Some(n.to_string()),
        Some(Raw::Bool(true)) => Some(true.to_string()),
        Some(Raw::Bool(false)) | Some(Raw::Other(_)) | None => None,
    })
}

/// The selectable profiles, in display order.
#[derive(Debug, Clone)]
pub struct ProfileBook {
    entries: Vec<(String, Profile)>,
}

impl ProfileBook {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// The four profiles shipped by default: `personal`, `business`, `test`
    /// and an empty `custom`.
    pub fn builtin() -> Self {
        use Category::*;

        let personal = Profile::new()
            .with(Name, "John Doe")
            .with(FirstName, "John")
            .with(LastName, "Doe")
            .with(Email, "john.doe@email.com")
            .with(Phone, "555-123-4567")
            .with(Address, "123 Main Street")
            .with(City, "New York")
            .with(State, "NY")
            .with(Zip, "10001")
            .with(Country, "United States");

        let business = Profile::new()
            .with(Name, "Jane Smith")
            .with(FirstName, "Jane")
            .with(LastName, "Smith")
            .with(Email, "jane.smith@company.com")
            .with(Phone, "555-987-6543")
            .with(Company, "Tech Corp Inc")
            .with(Address, "456 Business Ave")
            .with(City, "San Francisco")
            .with(State, "CA")
            .with(Zip, "94102")
            .with(Country, "United States");

        let test = Profile::new()
            .with(Name, "Test User")
            .with(FirstName, "Test")
            .with(LastName, "User")
            .with(Email, "test@example.com")
            .with(Phone, "555-000-0000")
            .with(Address, "789 Test Lane")
            .with(City, "TestCity")
            .with(State, "TC")
            .with(Zip, "00000")
            .with(Country, "TestLand")
            .with(Username, "testuser123")
            .with(Password, "Test@12345");

        Self::new()
            .insert("personal", personal)
            .insert("business", business)
            .insert("test", test)
            .insert("custom", Profile::new())
    }

    /// Adds or replaces a profile, keeping the original position on replace.
    pub fn insert(mut self, key: impl Into<String>, profile: Profile) -> Self {
        let key = key.into();
        match self.entries.iter().position(|(k, _)| *k == key) {
            Some(i) => self.entries[i].1 = profile,
            None => self.entries.push((key, profile)),
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&Profile> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, p)| p)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Profile)> {
        self.entries.iter().map(|(k, p)| (k.as_str(), p))
    }
}

impl Default for ProfileBook {
    fn default() -> Self {
        Self::builtin()
    }
}
