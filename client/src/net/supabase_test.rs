use super::*;

#[test]
fn new_trims_trailing_slash_and_whitespace() {
    let config = SupabaseConfig::new(" https://abc.supabase.co/ ", " key ");
    assert_eq!(config.url, "https://abc.supabase.co");
    assert_eq!(config.anon_key, "key");
}

#[test]
fn endpoints_use_versioned_prefixes() {
    let config = SupabaseConfig::new("https://abc.supabase.co", "key");
    assert_eq!(config.auth_endpoint("signup"), "https://abc.supabase.co/auth/v1/signup");
    assert_eq!(config.rest_endpoint("rooms"), "https://abc.supabase.co/rest/v1/rooms");
}

#[test]
fn configured_requires_url_and_key() {
    assert!(!SupabaseConfig::default().is_configured());
    assert!(!SupabaseConfig::new("https://abc.supabase.co", "").is_configured());
    assert!(SupabaseConfig::new("https://abc.supabase.co", "key").is_configured());
}

#[test]
fn from_document_is_unconfigured_outside_browser() {
    assert_eq!(SupabaseConfig::from_document(), SupabaseConfig::default());
}

#[test]
fn backend_shares_session_between_auth_and_db() {
    let backend = Backend::from_document();
    assert!(backend.auth.current_session().is_none());
    assert!(backend.db.auth().current_session().is_none());
}
