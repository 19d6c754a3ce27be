//! Field validation and normalization helpers shared by the group mutation
//! path.
//!
//! URL-valued fields are canonicalized by parsing and re-serializing with the
//! `url` crate, which appends the trailing slash on a bare origin
//! (`http://example.org` -> `http://example.org/`). Re-normalizing an
//! already-canonical value is a no-op, so a second submission round-trips.

use commons_types::error::FieldError;
use commons_types::group::{GroupForm, MembershipPolicy, slugify};
use commons_types::user::UserId;
use url::Url;

use super::policy::RestrictedSubmission;

/// A group form with every field checked and normalized, ready for the
/// permission policy. `None` free-text fields were absent from the payload.
#[derive(Debug, Clone)]
pub struct ValidatedForm {
    pub name: String,
    pub description: Option<String>,
    pub irc_channel: Option<String>,
    pub website: Option<String>,
    pub wiki: Option<String>,
    pub new_member_criteria: Option<String>,
    pub restricted: RestrictedSubmission,
}

/// Canonicalize a URL-valued field. Only http(s) URLs with a host pass.
pub fn normalize_url(field: &str, raw: &str) -> Result<String, FieldError> {
    let parsed =
        Url::parse(raw).map_err(|_| FieldError::new(field, "enter a valid URL"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(FieldError::new(field, "only http and https URLs are allowed"));
    }
    if parsed.host_str().is_none() {
        return Err(FieldError::new(field, "enter a valid URL"));
    }
    Ok(parsed.to_string())
}

/// Validate a submitted group form, collecting every field error before
/// returning. Normalization (URL canonicalization, policy parsing) applies
/// unconditionally, independent of the actor's role -- an invalid
/// `accepting_new_members` value is rejected here even when the field would
/// subsequently be forced.
pub fn validate_form(form: &GroupForm) -> Result<ValidatedForm, Vec<FieldError>> {
    let mut errors = Vec::new();

    let name = form.name.trim().to_string();
    if name.is_empty() {
        errors.push(FieldError::new("name", "this field is required"));
    } else if slugify(&name).is_empty() {
        errors.push(FieldError::new(
            "name",
            "name must contain at least one alphanumeric character",
        ));
    }

    let mut checked_url = |field: &str, value: &Option<String>| -> Option<String> {
        let raw = value.as_deref()?.trim();
        if raw.is_empty() {
            return Some(String::new());
        }
        match normalize_url(field, raw) {
            Ok(normalized) => Some(normalized),
            Err(err) => {
                errors.push(err);
                None
            }
        }
    };

    let website = checked_url("website", &form.website);
    let wiki = checked_url("wiki", &form.wiki);

    let accepting_new_members = match form.accepting_new_members.as_deref() {
        Some(raw) => match raw.parse::<MembershipPolicy>() {
            Ok(policy) => Some(policy),
            Err(message) => {
                errors.push(FieldError::new("accepting_new_members", message));
                None
            }
        },
        None => None,
    };

    let curator_id = match form.curator_id.as_deref() {
        Some(raw) if !raw.trim().is_empty() => match raw.trim().parse::<UserId>() {
            Ok(id) => Some(id),
            Err(_) => {
                errors.push(FieldError::new("curator_id", "invalid user identifier"));
                None
            }
        },
        _ => None,
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ValidatedForm {
        name,
        description: form.description.clone(),
        irc_channel: form.irc_channel.clone(),
        website,
        wiki,
        new_member_criteria: form.new_member_criteria.clone(),
        restricted: RestrictedSubmission {
            members_can_leave: form.members_can_leave,
            visible: form.visible,
            functional_area: form.functional_area,
            accepting_new_members,
            curator_id,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_adds_trailing_slash_on_bare_origin() {
        assert_eq!(
            normalize_url("website", "http://example.org").unwrap(),
            "http://example.org/"
        );
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize_url("website", "http://example.org").unwrap();
        let twice = normalize_url("website", &once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_normalize_keeps_paths() {
        assert_eq!(
            normalize_url("wiki", "https://wiki.example.org/Main_Page").unwrap(),
            "https://wiki.example.org/Main_Page"
        );
    }

    #[test]
    fn test_normalize_rejects_non_http() {
        assert!(normalize_url("website", "ftp://example.org").is_err());
        assert!(normalize_url("website", "not a url").is_err());
    }

    #[test]
    fn test_validate_requires_name() {
        let form = GroupForm::default();
        let errors = validate_form(&form).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "name");
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let form = GroupForm {
            name: String::new(),
            website: Some("nope".to_string()),
            accepting_new_members: Some("barracuda".to_string()),
            ..Default::default()
        };
        let errors = validate_form(&form).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "website", "accepting_new_members"]);
    }

    #[test]
    fn test_validate_rejects_bad_policy_even_though_forced_later() {
        let form = GroupForm {
            name: "Test Group".to_string(),
            accepting_new_members: Some("barracuda".to_string()),
            ..Default::default()
        };
        assert!(validate_form(&form).is_err());
    }

    #[test]
    fn test_validate_passes_through_free_text() {
        let form = GroupForm {
            name: "  Test Group  ".to_string(),
            irc_channel: Some("some text, this is not validated".to_string()),
            website: Some("http://example.org".to_string()),
            ..Default::default()
        };
        let validated = validate_form(&form).unwrap();
        assert_eq!(validated.name, "Test Group");
        assert_eq!(
            validated.irc_channel.as_deref(),
            Some("some text, this is not validated")
        );
        assert_eq!(validated.website.as_deref(), Some("http://example.org/"));
        assert!(validated.wiki.is_none());
    }
}
