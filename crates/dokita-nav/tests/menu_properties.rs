//! Menu visibility end to end: session grants and catalog through the
//! authorizer into the sidebar filter.

use dokita_auth::{
    Authorizer, GrantSet, IntersectionPolicy, PermissionCatalog, Requirement, StaticSession,
};
use dokita_nav::{NavEntry, dokita_sidebar, visible_menu};

fn authorizer(grants: &[&str], catalog: &[&str]) -> Authorizer {
    let session = StaticSession::new(grants.iter().copied().collect::<GrantSet>());
    Authorizer::from_session(
        &session,
        catalog.iter().copied().collect::<PermissionCatalog>(),
        IntersectionPolicy::FallbackToRaw,
    )
}

fn names(entries: &[NavEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.name.as_str()).collect()
}

#[test]
fn ungated_requirement_passes_with_empty_grants() {
    let auth = authorizer(&[], &[]);
    assert!(auth.has_permission(&Requirement::None));
}

#[test]
fn container_kept_for_visible_child() {
    let tree = vec![
        NavEntry::new("Admin", "/admin", "cog")
            .requires("ADMIN_PANEL_ONLY")
            .with_children(vec![
                NavEntry::new("Utilisateurs", "/admin_users", "users").requires("LIST_USERS"),
                NavEntry::new("Rôles", "/admin_roles", "key").requires("LIST_ROLES"),
            ]),
    ];
    let auth = authorizer(&["LIST_USERS"], &["LIST_USERS", "LIST_ROLES"]);
    let visible = visible_menu(&tree, |r| auth.has_permission(r));
    assert_eq!(visible.len(), 1);
    assert_eq!(names(&visible[0].children), vec!["Utilisateurs"]);
}

#[test]
fn ungated_leaf_always_survives() {
    let tree = vec![NavEntry::new("Dashboard", "/home", "th-large")];
    for grants in [&[][..], &["LIST_USERS"][..], &["ALL_PERMISSIONS"][..]] {
        let auth = authorizer(grants, &[]);
        let visible = visible_menu(&tree, |r| auth.has_permission(r));
        assert_eq!(names(&visible), vec!["Dashboard"]);
    }
}

#[test]
fn empty_session_sees_only_dashboard() {
    let auth = authorizer(&[], &[]);
    let visible = visible_menu(&dokita_sidebar(), |r| auth.has_permission(r));
    assert_eq!(names(&visible), vec!["Dashboard"]);
}

#[test]
fn wildcards_see_whole_sidebar() {
    let full = dokita_sidebar();
    for wildcard in ["ALL_PERMISSIONS", "ADMIN_PANEL"] {
        let auth = authorizer(&[wildcard], &["LIST_USERS"]);
        assert_eq!(visible_menu(&full, |r| auth.has_permission(r)), full);
    }
}

#[test]
fn sibling_order_preserved() {
    let auth = authorizer(
        &["SYNCHRONISATION", "LIST_PATIENTS", "LIST_VIDEO_CATEGORIES", "LIST_ROLES"],
        &[],
    );
    let visible = visible_menu(&dokita_sidebar(), |r| auth.has_permission(r));
    assert_eq!(
        names(&visible),
        vec![
            "Dashboard",
            "Patients",
            "Vidéos Educatives",
            "Synchronisation",
            "Administration"
        ]
    );
    let videos = &visible[2];
    assert_eq!(names(&videos.children), vec!["Catégorie"]);
    let admin = &visible[4];
    assert_eq!(names(&admin.children), vec!["Rôles"]);
}

#[test]
fn filtering_is_idempotent() {
    let auth = authorizer(&["LIST_USERS", "LIST_FORMATIONS", "LIST_DOCTORS"], &[]);
    let check = |r: &Requirement| auth.has_permission(r);
    let once = visible_menu(&dokita_sidebar(), check);
    let twice = visible_menu(&once, check);
    assert_eq!(once, twice);
}

#[test]
fn unloaded_and_missing_catalog_deny_alike() {
    let unloaded = authorizer(&["LIST_USERS"], &[]);
    let loaded = authorizer(&["LIST_USERS"], &["LIST_USERS", "LIST_ROLES"]);
    let req = Requirement::from("LIST_PATIENTS");
    assert!(!unloaded.has_permission(&req));
    assert!(!loaded.has_permission(&req));

    let tree = vec![NavEntry::new("Patients", "/patients", "user").requires("LIST_PATIENTS")];
    assert_eq!(
        visible_menu(&tree, |r| unloaded.has_permission(r)),
        visible_menu(&tree, |r| loaded.has_permission(r))
    );
}

#[test]
fn denied_child_hidden_despite_visible_grandchild() {
    let tree = vec![
        NavEntry::new("Top", "/top", "")
            .requires("TOP")
            .with_children(vec![
                NavEntry::new("Child", "/child", "")
                    .requires("CHILD_DENIED")
                    .with_children(vec![
                        NavEntry::new("Grand", "/grand", "").requires("GRAND"),
                        NavEntry::new("GrandDenied", "/grand_denied", "").requires("NOPE"),
                    ]),
            ]),
    ];
    let auth = authorizer(&["TOP", "GRAND"], &[]);
    let visible = visible_menu(&tree, |r| auth.has_permission(r));
    assert_eq!(names(&visible), vec!["Top"]);
    assert!(visible[0].children.is_empty());
}
