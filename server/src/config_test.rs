use std::sync::Mutex;

use super::*;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// # Safety
/// Callers hold `ENV_LOCK` so no other test reads the environment meanwhile.
unsafe fn clear_server_env() {
    unsafe {
        std::env::remove_var("PORT");
        std::env::remove_var("SUPABASE_URL");
        std::env::remove_var("SUPABASE_ANON_KEY");
        std::env::remove_var("SITE_ROOT");
    }
}

#[test]
fn from_env_defaults_port_and_site_root() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe {
        clear_server_env();
        std::env::set_var("SUPABASE_URL", "https://demo.supabase.co/");
        std::env::set_var("SUPABASE_ANON_KEY", "anon");
    }

    let cfg = ServerConfig::from_env().unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.backend.url, "https://demo.supabase.co");
    assert_eq!(cfg.backend.anon_key, "anon");
    assert_eq!(cfg.site_root, None);

    unsafe { clear_server_env() };
}

#[test]
fn from_env_reads_overrides() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe {
        clear_server_env();
        std::env::set_var("PORT", "8080");
        std::env::set_var("SUPABASE_URL", "https://demo.supabase.co");
        std::env::set_var("SUPABASE_ANON_KEY", "anon");
        std::env::set_var("SITE_ROOT", "/srv/site");
    }

    let cfg = ServerConfig::from_env().unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.site_root.as_deref(), Some("/srv/site"));

    unsafe { clear_server_env() };
}

#[test]
fn from_env_requires_backend_url_and_key() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe {
        clear_server_env();
        std::env::set_var("SUPABASE_ANON_KEY", "anon");
    }
    assert_eq!(ServerConfig::from_env(), Err(ConfigError::Missing { var: "SUPABASE_URL" }));

    unsafe {
        std::env::set_var("SUPABASE_URL", "https://demo.supabase.co");
        std::env::set_var("SUPABASE_ANON_KEY", "   ");
    }
    assert_eq!(ServerConfig::from_env(), Err(ConfigError::Missing { var: "SUPABASE_ANON_KEY" }));

    unsafe { clear_server_env() };
}

#[test]
fn from_env_rejects_non_numeric_port() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe {
        clear_server_env();
        std::env::set_var("PORT", "http");
        std::env::set_var("SUPABASE_URL", "https://demo.supabase.co");
        std::env::set_var("SUPABASE_ANON_KEY", "anon");
    }

    let err = ServerConfig::from_env().unwrap_err();
    assert_eq!(err, ConfigError::Invalid { var: "PORT", value: "http".to_owned() });
    assert_eq!(err.to_string(), "invalid value for PORT: \"http\"");

    unsafe { clear_server_env() };
}
