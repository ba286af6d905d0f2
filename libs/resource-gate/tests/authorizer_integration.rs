#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;
use std::thread;

use resource_gate::{
    AccessDecision, InMemoryUserDirectory, ResourceAuthConfig, ResourceAuthorizer, RuleKind,
    UserDirectory,
};
use tracing_test::traced_test;

fn site_config() -> ResourceAuthConfig {
    ResourceAuthConfig {
        omit_redirect: true,
        restrict: vec!["/admin/".to_owned(), "/api".to_owned()],
        permit: vec!["/api/public".to_owned()],
        permit_extensions: vec![".css".to_owned(), ".js".to_owned()],
        force_redirect: vec!["/login".to_owned(), "/admin".to_owned()],
    }
}

#[test]
fn test_configured_site_decisions() {
    let users = Arc::new(InMemoryUserDirectory::from_iter(["alice"]));
    let gate = ResourceAuthorizer::from_config(&site_config(), users);

    assert!(gate.needs_authentication("/admin"));
    assert!(gate.needs_authentication("/admin/users/42"));
    assert!(gate.needs_authentication("/api/v1/orders"));
    assert!(!gate.needs_authentication("/api/public/status"));
    assert!(!gate.needs_authentication("/admin/theme.css"));
    assert!(!gate.needs_authentication("/api/bundle.js"));
    assert!(!gate.needs_authentication("/apis"));
    assert!(!gate.needs_authentication("/index.html"));

    assert!(gate.needs_redirect("/login"));
    assert!(gate.needs_redirect("/admin/"));
    assert!(!gate.needs_redirect("/admin/users"));
    assert!(!gate.needs_redirect("/login/extra"));
}

#[test]
fn test_config_matches_hand_registration() {
    let users: Arc<dyn UserDirectory> = Arc::new(InMemoryUserDirectory::from_iter(["alice"]));
    let from_config = ResourceAuthorizer::from_config(&site_config(), Arc::clone(&users));

    let by_hand = ResourceAuthorizer::new(users);
    by_hand.add_restrict("/admin");
    by_hand.add_restrict("/api/");
    by_hand.add_permit("/api/public");
    by_hand.add_permit_extension(".css");
    by_hand.add_permit_extension(".js");
    by_hand.add_force_redirect("/login");
    by_hand.add_force_redirect("/admin");
    by_hand.set_omit_redirect(true);

    assert_eq!(from_config.snapshot(), by_hand.snapshot());
    for kind in RuleKind::ALL {
        assert_eq!(from_config.rules(kind), by_hand.rules(kind));
    }
}

#[test]
fn test_user_directory_changes_are_observed() {
    let users = Arc::new(InMemoryUserDirectory::new());
    let directory: Arc<dyn UserDirectory> = users.clone();
    let gate = ResourceAuthorizer::new(directory);
    gate.add_restrict("/");

    assert!(!gate.needs_authentication("/secret"));

    users.add_user("alice");
    assert!(gate.needs_authentication("/secret"));

    users.remove_user("alice");
    assert!(!gate.needs_authentication("/secret"));
}

#[test]
fn test_evaluate_request() {
    let users = Arc::new(InMemoryUserDirectory::from_iter(["alice"]));
    let gate = ResourceAuthorizer::from_config(&site_config(), users);

    let req = http::Request::builder()
        .method("GET")
        .uri("https://example.com/login?next=%2Fadmin")
        .body(())
        .unwrap();

    assert_eq!(
        gate.evaluate_for(&req),
        AccessDecision {
            redirect: true,
            authenticate: false,
        }
    );
}

#[test]
#[traced_test]
fn test_registration_logs_normalized_path() {
    let gate = ResourceAuthorizer::new(Arc::new(InMemoryUserDirectory::new()));
    gate.add_restrict("/reports/");
    gate.add_permit_extension(".png");

    assert!(logs_contain("resource=/reports"));
    assert!(logs_contain("kind=restrict"));
    assert!(logs_contain("resource=.png"));
    assert!(!logs_contain("resource=/reports/"));
}

#[test]
fn test_concurrent_registration_and_queries() {
    let users = Arc::new(InMemoryUserDirectory::from_iter(["alice"]));
    let gate = Arc::new(ResourceAuthorizer::new(users));
    gate.set_omit_redirect(true);

    thread::scope(|s| {
        for worker in 0..4 {
            let gate = Arc::clone(&gate);
            s.spawn(move || {
                for i in 0..100 {
                    gate.add_restrict(&format!("/w{worker}/r{i}/"));
                    gate.add_force_redirect(&format!("/w{worker}/login{i}"));
                }
            });
        }
        for _ in 0..4 {
            let gate = Arc::clone(&gate);
            s.spawn(move || {
                for i in 0..100 {
                    // authentication outcome races with registration
                    assert!(!gate.evaluate(&format!("/w0/r{i}/page")).redirect);
                    assert!(!gate.needs_redirect(&format!("/w1/login{i}/x")));
                }
            });
        }
    });

    assert_eq!(gate.rules(RuleKind::Restrict).len(), 400);
    assert_eq!(gate.rules(RuleKind::ForceRedirect).len(), 400);
    assert!(gate.needs_authentication("/w3/r99/page"));
    assert!(gate.needs_redirect("/w2/login7"));
    assert!(!gate.needs_redirect("/w2/login7/x"));
}
