use chrono::NaiveDate;
use form_filler::classifier::{classify, Confidence, FillContext, RULES};
use form_filler::{Category, FormControl, Profile};

fn full_profile() -> Profile {
    use Category::*;
    Profile::new()
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
        .with(Company, "Acme")
        .with(Username, "testuser123")
        .with(Password, "Test@12345")
}

fn ctx() -> FillContext {
    FillContext::new(true).today(NaiveDate::from_ymd_opt(2024, 3, 9).expect("valid date"))
}

fn value_for(control: &FormControl, profile: &Profile, ctx: &FillContext) -> Option<String> {
    classify(control, profile, ctx).and_then(|c| c.fill_value().map(str::to_string))
}

fn rule_for(control: &FormControl) -> Option<&'static str> {
    classify(control, &full_profile(), &ctx()).map(|c| c.rule.label)
}

#[test]
fn identity_joins_lowercased_attributes() {
    let control = FormControl::input("text")
        .name("First")
        .id("ID")
        .placeholder("Place")
        .aria_label("Aria")
        .class("Cls Two");
    assert_eq!(control.identity(), "first id place aria cls two");
}

#[test]
fn type_based_rules() {
    assert_eq!(rule_for(&FormControl::input("email").name("contact")), Some("email"));
    assert_eq!(rule_for(&FormControl::input("tel").name("contact")), Some("phone"));
    assert_eq!(rule_for(&FormControl::input("password").name("secret")), Some("password"));
    assert_eq!(rule_for(&FormControl::input("date").name("dob")), Some("date"));
}

#[test]
fn keyword_rules_match_any_identity_attribute() {
    assert_eq!(rule_for(&FormControl::input("text").name("first_name")), Some("firstName"));
    assert_eq!(rule_for(&FormControl::input("text").id("last-name")), Some("lastName"));
    assert_eq!(rule_for(&FormControl::input("text").placeholder("Your City")), Some("city"));
    assert_eq!(rule_for(&FormControl::input("text").aria_label("Postal code")), Some("zip"));
    assert_eq!(rule_for(&FormControl::input("text").class("form-control zip-input")), Some("zip"));
    assert_eq!(rule_for(&FormControl::input("text").name("street")), Some("address"));
    assert_eq!(rule_for(&FormControl::input("text").name("province")), Some("state"));
    assert_eq!(rule_for(&FormControl::input("text").name("nation")), Some("country"));
    assert_eq!(rule_for(&FormControl::input("text").name("company")), Some("company"));
    assert_eq!(rule_for(&FormControl::input("text").name("login")), Some("username"));
    assert_eq!(rule_for(&FormControl::input("text").name("pwd")), Some("password"));
}

#[test]
fn first_name_wins_over_generic_name() {
    let control = FormControl::input("text").name("firstname");
    let classification = classify(&control, &full_profile(), &ctx()).expect("should match");
    assert_eq!(classification.rule.label, "firstName");
    assert_eq!(classification.fill_value(), Some("Test"));
}

#[test]
fn generic_name_requires_no_name_part_keyword() {
    let control = FormControl::input("text").name("full-name");
    assert_eq!(value_for(&control, &full_profile(), &ctx()).as_deref(), Some("Test User"));
}

#[test]
fn earlier_rules_take_priority_on_ambiguous_identity() {
    // "user_email" also contains the username keyword "user".
    assert_eq!(rule_for(&FormControl::input("text").name("user_email")), Some("email"));
    // "username" contains the generic name keyword, which is checked first.
    assert_eq!(rule_for(&FormControl::input("text").name("username")), Some("name"));
    // An email-typed input wins even with a phone-like name.
    assert_eq!(rule_for(&FormControl::input("email").name("phone")), Some("email"));
}

#[test]
fn matching_is_case_insensitive() {
    assert_eq!(rule_for(&FormControl::input("text").name("EMAIL_ADDRESS")), Some("email"));
    assert_eq!(rule_for(&FormControl::input("EMAIL")), Some("email"));
}

#[test]
fn date_uses_context_day_regardless_of_profile() {
    let control = FormControl::input("date").name("start");
    assert_eq!(value_for(&control, &Profile::new(), &ctx()).as_deref(), Some("2024-03-09"));
}

#[test]
fn number_takes_age_only_when_present() {
    let control = FormControl::input("number").name("years");
    let with_age = full_profile().with(Category::Age, "42");
    assert_eq!(value_for(&control, &with_age, &ctx()).as_deref(), Some("42"));
    assert!(classify(&control, &full_profile(), &ctx()).is_none());
}

#[test]
fn textarea_uses_message_or_fallback() {
    let control = FormControl::textarea().name("comments");
    assert_eq!(
        value_for(&control, &full_profile(), &ctx()).as_deref(),
        Some("This is a test message.")
    );

    let with_message = full_profile().with(Category::Message, "Hello there");
    assert_eq!(value_for(&control, &with_message, &ctx()).as_deref(), Some("Hello there"));

    let custom = ctx().message_fallback("Lorem ipsum");
    assert_eq!(value_for(&control, &full_profile(), &custom).as_deref(), Some("Lorem ipsum"));
}

#[test]
fn auto_detect_fallback_for_plain_text() {
    let control = FormControl::input("text").name("xyz");

    let classification = classify(&control, &full_profile(), &ctx()).expect("auto-detect applies");
    assert_eq!(classification.rule.confidence, Confidence::Low);
    assert_eq!(classification.fill_value(), Some("Test User"));

    let off = FillContext::new(false);
    assert!(classify(&control, &full_profile(), &off).is_none());

    // Without a name the fallback produces nothing to write.
    let nameless = Profile::new().with(Category::Email, "a@b.com");
    let classification = classify(&control, &nameless, &ctx()).expect("rule still claims it");
    assert_eq!(classification.fill_value(), None);
}

#[test]
fn missing_profile_value_stops_the_cascade() {
    // The email rule claims the control; the profile has no email, and the
    // auto-detect fallback must not be tried instead.
    let control = FormControl::input("text").name("email");
    let classification = classify(&control, &Profile::new().with(Category::Name, "N"), &ctx())
        .expect("email rule matches");
    assert_eq!(classification.rule.label, "email");
    assert_eq!(classification.fill_value(), None);
}

#[test]
fn selects_are_matched_by_keywords() {
    let control = FormControl::select().name("country");
    assert_eq!(value_for(&control, &full_profile(), &ctx()).as_deref(), Some("TestLand"));
}

#[test]
fn unmatched_non_text_control_has_no_rule() {
    assert!(classify(&FormControl::input("range").name("volume"), &full_profile(), &ctx()).is_none());
    assert!(classify(&FormControl::input("checkbox").name("agree"), &full_profile(), &ctx()).is_none());
}

#[test]
fn only_the_fallback_rule_is_low_confidence() {
    let low: Vec<_> = RULES.iter().filter(|r| r.confidence == Confidence::Low).map(|r| r.label).collect();
    assert_eq!(low, vec!["autoDetect"]);
}

#[test]
fn eligibility_filters() {
    for kind in ["hidden", "submit", "button", "image", "file"] {
        assert!(!FormControl::input(kind).is_fillable(), "{kind} should not be fillable");
    }
    assert!(!FormControl::input("text").disabled().is_fillable());
    assert!(!FormControl::input("text").read_only().is_fillable());
    assert!(FormControl::input("text").is_fillable());
    assert!(FormControl::select().is_fillable());

    assert!(FormControl::input("image").is_clearable());
    assert!(FormControl::input("file").is_clearable());
    assert!(!FormControl::input("hidden").is_clearable());
    assert!(!FormControl::select().is_clearable());
    assert!(FormControl::textarea().is_clearable());
}
