//! Query rendering for the ledger index.
//!
//! # Invariants
//! - Every interpolated value is escaped as a string literal, so an owner or
//!   id can never close its literal and add filters.
//! - Owner queries always filter on the matching protocol tag.

use crate::config::ProtocolConfig;
use crate::model::tag::{TAG_CONTENT_TYPE, TAG_DEPLOY, TAG_PROTOCOL};

/// What a query is for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryIntent<'a> {
    /// Profile entries owned by one address.
    ProfileByOwner(&'a str),
    /// Page entries owned by one address, with size and block metadata.
    PagesByOwner(&'a str),
    /// Entries whose id is in the given set.
    ByIds(&'a [String]),
    /// Every deploy manifest of the application, id only.
    DeployHistory,
}

impl QueryIntent<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ProfileByOwner(_) => "profile_by_owner",
            Self::PagesByOwner(_) => "pages_by_owner",
            Self::ByIds(_) => "by_ids",
            Self::DeployHistory => "deploy_history",
        }
    }
}

/// Renders the query string for `intent`.
pub fn build_query(intent: &QueryIntent<'_>, config: &ProtocolConfig) -> String {
    match intent {
        QueryIntent::ProfileByOwner(owner) => format!(
            r#"query {{
  transactions(
    owners: [{owner}],
    tags: [{{ name: {protocol_tag}, values: [{protocol}] }}]
  ) {{
    edges {{
      node {{
        id
        owner {{ address }}
        tags {{ name value }}
      }}
    }}
  }}
}}"#,
            owner = literal(owner),
            protocol_tag = literal(TAG_PROTOCOL),
            protocol = literal(&config.profile_protocol),
        ),
        QueryIntent::PagesByOwner(owner) => format!(
            r#"query {{
  transactions(
    owners: [{owner}],
    tags: [{{ name: {protocol_tag}, values: [{protocol}] }}]
  ) {{
    edges {{
      node {{
        id
        owner {{ address }}
        tags {{ name value }}
        data {{ size }}
        block {{ id }}
      }}
    }}
  }}
}}"#,
            owner = literal(owner),
            protocol_tag = literal(TAG_PROTOCOL),
            protocol = literal(&config.pages_protocol),
        ),
        QueryIntent::ByIds(ids) => format!(
            r#"query {{
  transactions(ids: [{ids}]) {{
    edges {{
      node {{
        id
        owner {{ address }}
        tags {{ name value }}
      }}
    }}
  }}
}}"#,
            ids = ids
                .iter()
                .map(String::as_str)
                .map(literal)
                .collect::<Vec<_>>()
                .join(", "),
        ),
        QueryIntent::DeployHistory => format!(
            r#"query {{
  transactions(
    tags: [
      {{ name: {deploy_tag}, values: [{app}] }},
      {{ name: {content_type_tag}, values: [{content_type}] }}
    ]
  ) {{
    edges {{
      node {{
        id
      }}
    }}
  }}
}}"#,
            deploy_tag = literal(TAG_DEPLOY),
            app = literal(&config.deploy_app),
            content_type_tag = literal(TAG_CONTENT_TYPE),
            content_type = literal(&config.manifest_content_type),
        ),
    }
}

/// Quotes `value` as a query-language string literal.
fn literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c < ' ' => out.push_str(&format!("\\u{:04x}", u32::from(c))),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}
