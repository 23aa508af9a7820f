//! Saved search format
//!
//! ```text
//! <zyzzyva-search version="1">
//!   <conditions>
//!     <and>
//!       <condition type="Pattern Match" string="C?T" negated="0"/>
//!       <condition type="Length" min="3" max="3"/>
//!     </and>
//!   </conditions>
//! </zyzzyva-search>
//! ```
//!
//! Older files may use retired condition names; they are rewritten to the
//! current kinds while parsing, and `SearchSpec::update` runs afterwards.

use super::condition::{ConditionKind, Payload, SearchCondition};
use super::migration::CURRENT_VERSION;
use super::set::{OLD_NEW_IN_CSW, OLD_NEW_IN_OWL2};
use super::spec::SearchSpec;
use crate::core::MAX_WORD_LEN;
use roxmltree::{Document, Node, ParsingOptions};
use std::fmt::Write;
use thiserror::Error;

const TOP_ELEMENT: &str = "zyzzyva-search";
const CONDITIONS_ELEMENT: &str = "conditions";
const AND_ELEMENT: &str = "and";
const OR_ELEMENT: &str = "or";
const CONDITION_ELEMENT: &str = "condition";

const VERSION_ATTR: &str = "version";
const TYPE_ATTR: &str = "type";
const STRING_ATTR: &str = "string";
const MIN_ATTR: &str = "min";
const MAX_ATTR: &str = "max";
const INT_ATTR: &str = "int";
const NEGATED_ATTR: &str = "negated";
const BOOL_ATTR: &str = "bool";
const OLD_NUMBER_ATTR: &str = "number";
const OLD_PERCENT_ATTR: &str = "percent";

/// Blanks assumed by probability conditions saved without an `int`
const DEFAULT_BLANKS: i32 = 2;

/// Lexicons that replaced the retired "New in ..." groups
const LEXICON_OWL: &str = "OWL";
const LEXICON_OSWI: &str = "OSWI";

/// Error reading a saved search
#[derive(Debug, Error)]
pub enum SpecError {
    #[error("invalid XML: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("expected <{expected}> element, found <{found}>")]
    UnexpectedElement {
        expected: &'static str,
        found: String,
    },
    #[error("missing <{0}> element")]
    MissingElement(&'static str),
    #[error("unknown condition type \"{0}\"")]
    UnknownType(String),
    #[error("condition \"{kind}\" is missing the {attribute} attribute")]
    MissingAttribute {
        kind: String,
        attribute: &'static str,
    },
    #[error("invalid number \"{value}\" in {attribute} attribute")]
    InvalidNumber {
        attribute: &'static str,
        value: String,
    },
    #[error("condition \"{0}\" has an empty string value")]
    EmptyString(String),
    #[error("search has no conditions")]
    NoConditions,
}

#[derive(Debug, Clone, Copy)]
enum NumberShape {
    Exact,
    AtLeast(i32),
    AtMost,
}

#[derive(Debug, Clone, Copy)]
enum Legacy {
    /// Old name for a current kind
    Alias(ConditionKind),
    /// Old name for the negated form of a current kind
    Negated(ConditionKind),
    /// Old single-number form of a range kind
    Numbered(ConditionKind, NumberShape),
}

const LEGACY_TYPES: [(&str, Legacy); 14] = [
    (
        "Exact Length",
        Legacy::Numbered(ConditionKind::Length, NumberShape::Exact),
    ),
    (
        "Minimum Length",
        Legacy::Numbered(
            ConditionKind::Length,
            NumberShape::AtLeast(MAX_WORD_LEN as i32),
        ),
    ),
    (
        "Maximum Length",
        Legacy::Numbered(ConditionKind::Length, NumberShape::AtMost),
    ),
    (
        "Does Not Take Prefix",
        Legacy::Negated(ConditionKind::Prefix),
    ),
    (
        "Does Not Take Suffix",
        Legacy::Negated(ConditionKind::Suffix),
    ),
    ("Must Include", Legacy::Alias(ConditionKind::IncludeLetters)),
    (
        "Must Exclude",
        Legacy::Negated(ConditionKind::IncludeLetters),
    ),
    ("Must Consist of", Legacy::Alias(ConditionKind::ConsistOf)),
    ("Must Belong to", Legacy::Alias(ConditionKind::BelongToGroup)),
    ("Must Be in Word List", Legacy::Alias(ConditionKind::InWordList)),
    (
        "Must Not Be in Word List",
        Legacy::Negated(ConditionKind::InWordList),
    ),
    (
        "Exact Anagrams",
        Legacy::Numbered(ConditionKind::NumAnagrams, NumberShape::Exact),
    ),
    (
        "Minimum Anagrams",
        Legacy::Numbered(ConditionKind::NumAnagrams, NumberShape::AtLeast(999_999)),
    ),
    (
        "Maximum Anagrams",
        Legacy::Numbered(ConditionKind::NumAnagrams, NumberShape::AtMost),
    ),
];

/// Escape special characters for XML attribute values
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
        .replace('\n', "&#10;")
        .replace('\r', "&#13;")
        .replace('\t', "&#9;")
}

impl SearchCondition {
    /// Serialize as a `<condition>` element
    #[must_use]
    pub fn to_xml_element(&self) -> String {
        let mut out = format!("<{CONDITION_ELEMENT} {TYPE_ATTR}=\"{}\"", escape_xml(self.kind.name()));
        let mut attr = |name: &str, value: &str| {
            let _ = write!(out, " {name}=\"{}\"", escape_xml(value));
        };

        match self.kind.payload() {
            Payload::Text => {
                attr(STRING_ATTR, &self.string);
                attr(NEGATED_ATTR, if self.negated { "1" } else { "0" });
            }
            Payload::Range => {
                attr(MIN_ATTR, &self.min.to_string());
                attr(MAX_ATTR, &self.max.to_string());
            }
            Payload::Probability => {
                attr(MIN_ATTR, &self.min.to_string());
                attr(MAX_ATTR, &self.max.to_string());
                attr(INT_ATTR, &self.blanks.to_string());
            }
            Payload::Order => {
                attr(INT_ATTR, &self.blanks.to_string());
                attr(BOOL_ATTR, if self.lax { "true" } else { "false" });
                attr(MIN_ATTR, &self.min.to_string());
                attr(MAX_ATTR, &self.max.to_string());
            }
            Payload::Percentage => {
                attr(MIN_ATTR, &self.min.to_string());
                attr(MAX_ATTR, &self.max.to_string());
                attr(STRING_ATTR, &self.string);
            }
        }
        out.push_str("/>");
        out
    }

    /// Parse a `<condition>` element
    ///
    /// Retired type names are rewritten to their current kind.
    ///
    /// # Errors
    /// Returns `SpecError` if the element is not a condition, its type is
    /// unknown, or an attribute its type needs is missing or not a number.
    pub fn from_element(element: Node<'_, '_>) -> Result<Self, SpecError> {
        expect_tag(element, CONDITION_ELEMENT)?;
        let type_name = element
            .attribute(TYPE_ATTR)
            .ok_or_else(|| SpecError::MissingAttribute {
                kind: String::new(),
                attribute: TYPE_ATTR,
            })?;

        if let Some(kind) = ConditionKind::from_name(type_name) {
            return parse_current(element, kind, type_name);
        }
        let legacy = LEGACY_TYPES
            .iter()
            .find(|(name, _)| *name == type_name)
            .map(|(_, legacy)| *legacy)
            .ok_or_else(|| SpecError::UnknownType(type_name.to_string()))?;

        match legacy {
            Legacy::Alias(kind) => parse_current(element, kind, type_name),
            Legacy::Negated(kind) => {
                let mut condition = SearchCondition::new(kind);
                condition.string = required(element, STRING_ATTR, type_name)?.to_string();
                condition.negated = true;
                Ok(condition)
            }
            Legacy::Numbered(kind, shape) => {
                let number = required_int(element, OLD_NUMBER_ATTR, type_name)?;
                let mut condition = SearchCondition::new(kind);
                (condition.min, condition.max) = match shape {
                    NumberShape::Exact => (number, number),
                    NumberShape::AtLeast(max) => (number, max),
                    NumberShape::AtMost => (0, number),
                };
                Ok(condition)
            }
        }
    }
}

fn parse_current(
    element: Node<'_, '_>,
    kind: ConditionKind,
    type_name: &str,
) -> Result<SearchCondition, SpecError> {
    let mut condition = SearchCondition::new(kind);

    match kind.payload() {
        Payload::Text => {
            condition.string = required(element, STRING_ATTR, type_name)?.to_string();
            if let Some(n) = element.attribute(NEGATED_ATTR) {
                if let Ok(n) = n.trim().parse::<i32>() {
                    condition.negated = n != 0;
                }
            }
            if kind == ConditionKind::BelongToGroup {
                retire_new_in_group(&mut condition);
            }
            if !kind.is_match_kind() && condition.string.is_empty() {
                return Err(SpecError::EmptyString(type_name.to_string()));
            }
        }
        Payload::Range => {
            condition.min = required_int(element, MIN_ATTR, type_name)?;
            condition.max = required_int(element, MAX_ATTR, type_name)?;
        }
        Payload::Probability => {
            condition.min = required_int(element, MIN_ATTR, type_name)?;
            condition.max = required_int(element, MAX_ATTR, type_name)?;
            condition.blanks = optional_int(element, INT_ATTR)?.unwrap_or(DEFAULT_BLANKS);
        }
        Payload::Order => {
            condition.blanks = optional_int(element, INT_ATTR)?.unwrap_or(DEFAULT_BLANKS);
            condition.lax = element.attribute(BOOL_ATTR) == Some("true");
            condition.min = required_int(element, MIN_ATTR, type_name)?;
            condition.max = required_int(element, MAX_ATTR, type_name)?;
        }
        Payload::Percentage => {
            condition.string = required(element, STRING_ATTR, type_name)?.to_string();
            let old_percent = element
                .attribute(OLD_PERCENT_ATTR)
                .and_then(|p| p.trim().parse::<i32>().ok());
            if let Some(percent) = old_percent {
                condition.min = percent;
                condition.max = 100;
            } else {
                condition.min = required_int(element, MIN_ATTR, type_name)?;
                condition.max = required_int(element, MAX_ATTR, type_name)?;
            }
        }
    }
    Ok(condition)
}

/// "New in ..." groups became In Lexicon conditions with the sense flipped
fn retire_new_in_group(condition: &mut SearchCondition) {
    let lexicon = match condition.string.as_str() {
        OLD_NEW_IN_OWL2 => LEXICON_OWL,
        OLD_NEW_IN_CSW => LEXICON_OSWI,
        _ => return,
    };
    condition.kind = ConditionKind::InLexicon;
    condition.string = lexicon.to_string();
    condition.negated = !condition.negated;
}

fn expect_tag(element: Node<'_, '_>, expected: &'static str) -> Result<(), SpecError> {
    let found = element.tag_name().name();
    if found == expected {
        Ok(())
    } else {
        Err(SpecError::UnexpectedElement {
            expected,
            found: found.to_string(),
        })
    }
}

fn required<'a>(
    element: Node<'a, '_>,
    attribute: &'static str,
    type_name: &str,
) -> Result<&'a str, SpecError> {
    element
        .attribute(attribute)
        .ok_or_else(|| SpecError::MissingAttribute {
            kind: type_name.to_string(),
            attribute,
        })
}

fn parse_int(attribute: &'static str, value: &str) -> Result<i32, SpecError> {
    value
        .trim()
        .parse()
        .map_err(|_| SpecError::InvalidNumber {
            attribute,
            value: value.to_string(),
        })
}

fn required_int(
    element: Node<'_, '_>,
    attribute: &'static str,
    type_name: &str,
) -> Result<i32, SpecError> {
    parse_int(attribute, required(element, attribute, type_name)?)
}

fn optional_int(element: Node<'_, '_>, attribute: &'static str) -> Result<Option<i32>, SpecError> {
    element
        .attribute(attribute)
        .map(|value| parse_int(attribute, value))
        .transpose()
}

fn first_element<'a, 'input>(node: Node<'a, 'input>) -> Option<Node<'a, 'input>> {
    node.children().find(Node::is_element)
}

impl SearchSpec {
    /// Serialize as a `<zyzzyva-search>` element
    ///
    /// An empty spec writes only the top element.
    #[must_use]
    pub fn to_xml_element(&self) -> String {
        let mut out = format!("<{TOP_ELEMENT} {VERSION_ATTR}=\"{CURRENT_VERSION}\"");
        if self.conditions.is_empty() {
            out.push_str("/>");
            return out;
        }
        let group = if self.conjunction { AND_ELEMENT } else { OR_ELEMENT };
        let _ = write!(out, ">\n  <{CONDITIONS_ELEMENT}>\n    <{group}>\n");
        for condition in &self.conditions {
            let _ = writeln!(out, "      {}", condition.to_xml_element());
        }
        let _ = write!(out, "    </{group}>\n  </{CONDITIONS_ELEMENT}>\n</{TOP_ELEMENT}>");
        out
    }

    /// Serialize as a complete XML document
    #[must_use]
    pub fn to_xml(&self) -> String {
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <!DOCTYPE {TOP_ELEMENT} SYSTEM \"http://boshvark.com/dtd/zyzzyva-search.dtd\">\n\
             {}\n",
            self.to_xml_element()
        )
    }

    /// Parse a saved search document and bring it up to date
    ///
    /// # Errors
    /// Returns `SpecError` if the text is not XML or does not describe a
    /// search (see [`SearchSpec::from_element`]).
    pub fn from_xml(text: &str) -> Result<Self, SpecError> {
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        let document = Document::parse_with_options(text, options)?;
        Self::from_element(document.root_element())
    }

    /// Parse a `<zyzzyva-search>` element and bring it up to date
    ///
    /// A missing version attribute means the oldest format.
    ///
    /// # Errors
    /// Returns `SpecError` if an element is missing or misnamed, any
    /// condition fails to parse, or there are no conditions.
    pub fn from_element(element: Node<'_, '_>) -> Result<Self, SpecError> {
        expect_tag(element, TOP_ELEMENT)?;

        let version = match element.attribute(VERSION_ATTR) {
            Some(value) => {
                let version = parse_int(VERSION_ATTR, value)?;
                u32::try_from(version).map_err(|_| SpecError::InvalidNumber {
                    attribute: VERSION_ATTR,
                    value: value.to_string(),
                })?
            }
            None => 0,
        };

        let conditions_element =
            first_element(element).ok_or(SpecError::MissingElement(CONDITIONS_ELEMENT))?;
        expect_tag(conditions_element, CONDITIONS_ELEMENT)?;

        let group = first_element(conditions_element).ok_or(SpecError::MissingElement(AND_ELEMENT))?;
        let conjunction = match group.tag_name().name() {
            AND_ELEMENT => true,
            OR_ELEMENT => false,
            other => {
                return Err(SpecError::UnexpectedElement {
                    expected: AND_ELEMENT,
                    found: other.to_string(),
                });
            }
        };

        let conditions = group
            .children()
            .filter(Node::is_element)
            .map(SearchCondition::from_element)
            .collect::<Result<Vec<_>, _>>()?;
        if conditions.is_empty() {
            return Err(SpecError::NoConditions);
        }

        let mut spec = Self {
            conditions,
            conjunction,
            version,
        };
        spec.update();
        Ok(spec)
    }
}
