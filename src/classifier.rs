//! Heuristic mapping of form controls to profile values.
//!
//! Classification walks [`RULES`] in order and stops at the first rule whose
//! condition holds. Reordering the list changes which value an ambiguous
//! control receives, e.g. `user_email` resolves to email only because the
//! email rule precedes the username rule.

use chrono::NaiveDate;

use crate::control::{FormControl, Tag};
use crate::keywords;
use crate::profile::{Category, Profile};

/// How much a rule's match can be trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confidence {
    High,
    Low,
}

/// Condition under which a rule claims a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    /// The control has the given type, or its identity matches the keywords.
    TypeOrKeywords(&'static str, Category),
    /// The identity matches the category's keywords.
    Keywords(Category),
    /// Generic name keyword with no first/last name keyword alongside it.
    BareName,
    /// The control has the given type.
    Type(&'static str),
    /// A number input, and the profile has an age.
    NumberWithAge,
    /// A multi-line text area.
    Textarea,
    /// A plain text input while auto-detect is on.
    AutoDetectText,
}

/// Where a matched rule takes its value from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Profile(Category),
    /// Today's date as `YYYY-MM-DD`.
    Today,
    /// The profile message, or the configured fallback text.
    Message,
}

#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub label: &'static str,
    pub condition: Condition,
    pub source: Source,
    pub confidence: Confidence,
}

const fn rule(label: &'static str, condition: Condition, source: Source) -> Rule {
    Rule { label, condition, source, confidence: Confidence::High }
}

const fn keyword_rule(label: &'static str, category: Category) -> Rule {
    rule(label, Condition::Keywords(category), Source::Profile(category))
}

pub static RULES: &[Rule] = &[
    rule("email", Condition::TypeOrKeywords("email", Category::Email), Source::Profile(Category::Email)),
    rule("phone", Condition::TypeOrKeywords("tel", Category::Phone), Source::Profile(Category::Phone)),
    keyword_rule("firstName", Category::FirstName),
    keyword_rule("lastName", Category::LastName),
    rule("name", Condition::BareName, Source::Profile(Category::Name)),
    keyword_rule("address", Category::Address),
    keyword_rule("city", Category::City),
    keyword_rule("state", Category::State),
    keyword_rule("zip", Category::Zip),
    keyword_rule("country", Category::Country),
    keyword_rule("company", Category::Company),
    keyword_rule("username", Category::Username),
    rule("password", Condition::TypeOrKeywords("password", Category::Password), Source::Profile(Category::Password)),
    rule("date", Condition::Type("date"), Source::Today),
    rule("age", Condition::NumberWithAge, Source::Profile(Category::Age)),
    rule("message", Condition::Textarea, Source::Message),
    Rule {
        label: "autoDetect",
        condition: Condition::AutoDetectText,
        source: Source::Profile(Category::Name),
        confidence: Confidence::Low,
    },
];

/// Per-invocation inputs that are not part of the profile.
#[derive(Debug, Clone)]
pub struct FillContext {
    pub auto_detect: bool,
    pub today: NaiveDate,
    pub message_fallback: String,
}

impl FillContext {
    pub fn new(auto_detect: bool) -> Self {
        Self {
            auto_detect,
            today: chrono::Utc::now().date_naive(),
            message_fallback: crate::config::DEFAULT_MESSAGE_FALLBACK.to_string(),
        }
    }

    pub fn today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn message_fallback(mut self, message: impl Into<String>) -> Self {
        self.message_fallback = message.into();
        self
    }
}

/// The rule that claimed a control and the value it produced, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub rule: &'static Rule,
    pub value: Option<String>,
}

impl PartialEq for Rule {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label
    }
}

impl Classification {
    /// The value to write, present only when it is non-empty.
    pub fn fill_value(&self) -> Option<&str> {
        self.value.as_deref().filter(|v| !v.is_empty())
    }
}

/// Runs the rule cascade over one control.
///
/// Returns `None` when no rule applies. A `Some` with no value means a rule
/// claimed the control but the profile has nothing for it.
pub fn classify(control: &FormControl, profile: &Profile, ctx: &FillContext) -> Option<Classification> {
    let identity = control.identity();
    RULES
        .iter()
        .find(|r| condition_holds(r.condition, control, &identity, profile, ctx))
        .map(|rule| Classification { rule, value: resolve(rule.source, profile, ctx) })
}

fn condition_holds(
    condition: Condition,
    control: &FormControl,
    identity: &str,
    profile: &Profile,
    ctx: &FillContext,
) -> bool {
    match condition {
        Condition::TypeOrKeywords(kind, category) => {
            control.is_type(kind) || keywords::matches_any(identity, keywords::for_category(category))
        }
        Condition::Keywords(category) => keywords::matches_any(identity, keywords::for_category(category)),
        Condition::BareName => {
            keywords::matches_any(identity, keywords::NAME) && !keywords::mentions_name_part(identity)
        }
        Condition::Type(kind) => control.is_type(kind),
        Condition::NumberWithAge => control.is_type("number") && profile.get(Category::Age).is_some(),
        Condition::Textarea => control.tag == Tag::Textarea,
        Condition::AutoDetectText => ctx.auto_detect && control.is_type("text"),
    }
}

fn resolve(source: Source, profile: &Profile, ctx: &FillContext) -> Option<String> {
    match source {
        Source::Profile(category) => profile.get(category).map(str::to_string),
        Source::Today => Some(ctx.today.format("%Y-%m-%d").to_string()),
        Source::Message => Some(
            profile
                .get(Category::Message)
                .unwrap_or(ctx.message_fallback.as_str())
                .to_string(),
        ),
    }
}
