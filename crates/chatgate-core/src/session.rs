//! Session token resolution.
//!
//! A session is a grouping key, not a stored entity. A request-supplied
//! token is used verbatim only if it is a strict 36-character hyphenated
//! UUID; anything else gets a freshly minted v4 token.

use uuid::Uuid;

/// Length of the canonical hyphenated UUID text form.
const HYPHENATED_LEN: usize = 36;

/// Accept `token` iff it is a well-formed hyphenated UUID.
///
/// `Uuid::parse_str` also admits simple (32-char), urn-prefixed, and braced
/// forms; the length check pins the grammar to the canonical one.
pub fn validate_token(token: &str) -> Option<Uuid> {
    if token.len() != HYPHENATED_LEN {
        return None;
    }
    Uuid::parse_str(token).ok()
}

/// Resolve the session for a request: the supplied token when valid,
/// otherwise a fresh v4 identifier.
pub fn resolve(token: Option<&str>) -> Uuid {
    token.and_then(validate_token).unwrap_or_else(Uuid::new_v4)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_token_used_verbatim() {
        let id = Uuid::new_v4();
        let token = id.to_string();
        assert_eq!(resolve(Some(&token)), id);
    }

    #[test]
    fn test_absent_token_minted() {
        let a = resolve(None);
        let b = resolve(None);
        assert_ne!(a, b);
    }

    #[test]
    fn test_garbage_token_replaced() {
        let resolved = resolve(Some("not-a-uuid"));
        assert!(validate_token(&resolved.to_string()).is_some());
    }

    #[test]
    fn test_simple_form_rejected() {
        // 32 hex chars without hyphens parses as a Uuid but is not the
        // canonical grammar.
        let simple = Uuid::new_v4().simple().to_string();
        assert!(validate_token(&simple).is_none());
    }

    #[test]
    fn test_urn_form_rejected() {
        let urn = format!("urn:uuid:{}", Uuid::new_v4());
        assert!(validate_token(&urn).is_none());
    }

    #[test]
    fn test_empty_token_replaced() {
        let resolved = resolve(Some(""));
        assert_eq!(resolved.to_string().len(), 36);
    }
}
