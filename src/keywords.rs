//! Keyword sets matched against a control's identity string.

use crate::profile::Category;

pub const EMAIL: &[&str] = &["email", "e-mail", "mail"];
pub const PHONE: &[&str] = &["phone", "tel", "mobile", "cell"];
pub const FIRST_NAME: &[&str] = &["firstname", "first-name", "first_name", "fname", "given"];
pub const LAST_NAME: &[&str] = &["lastname", "last-name", "last_name", "lname", "surname", "family"];
pub const NAME: &[&str] = &["name", "fullname", "full-name", "full_name"];
pub const ADDRESS: &[&str] = &["address", "street", "addr", "line1"];
pub const CITY: &[&str] = &["city", "town", "locality"];
pub const STATE: &[&str] = &["state", "province", "region"];
pub const ZIP: &[&str] = &["zip", "postal", "postcode", "pincode"];
pub const COUNTRY: &[&str] = &["country", "nation"];
pub const COMPANY: &[&str] = &["company", "organization", "org"];
pub const USERNAME: &[&str] = &["username", "user", "login"];
pub const PASSWORD: &[&str] = &["password", "pass", "pwd"];

/// Keywords for a category. Age and message are matched by control type only.
pub fn for_category(category: Category) -> &'static [&'static str] {
    match category {
        Category::Email => EMAIL,
        Category::Phone => PHONE,
        Category::FirstName => FIRST_NAME,
        Category::LastName => LAST_NAME,
        Category::Name => NAME,
        Category::Address => ADDRESS,
        Category::City => CITY,
        Category::State => STATE,
        Category::Zip => ZIP,
        Category::Country => COUNTRY,
        Category::Company => COMPANY,
        Category::Username => USERNAME,
        Category::Password => PASSWORD,
        Category::Age | Category::Message => &[],
    }
}

/// Substring containment of any keyword. `text` must already be lower-cased.
pub fn matches_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

/// True if `text` contains any first-name or last-name keyword.
pub fn mentions_name_part(text: &str) -> bool {
    matches_any(text, FIRST_NAME) || matches_any(text, LAST_NAME)
}
