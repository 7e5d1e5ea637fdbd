//! The Dokita dashboard sidebar.

use crate::menu::NavEntry;

pub fn dokita_sidebar() -> Vec<NavEntry> {
    vec![
        NavEntry::new("Dashboard", "/home", "th-large"),
        NavEntry::new("Patients", "/patients", "user").requires("LIST_PATIENTS"),
        NavEntry::new("Docteurs", "/doctors", "user-md").requires("LIST_DOCTORS"),
        NavEntry::new("Abonnements", "/abonnement", "credit-card").requires("LIST_SUBSCRIPTIONS"),
        NavEntry::new("Rendez-vous", "/rendez_vous", "calendar-check").requires("LIST_APPOINTMENTS"),
        NavEntry::new("Transactions", "/transaction", "credit-card").requires("LIST_TRANSACTIONS"),
        NavEntry::new("Ordonnance", "/ordonnance", "prescription-bottle")
            .requires("LIST_ORDONNANCES")
            .with_children(vec![
                NavEntry::new("Médicament", "/ordonnance", "pills").requires("LIST_MEDICAMENTS"),
                NavEntry::new("Maladie", "/listRole", "virus").requires("LIST_MALADIES"),
            ]),
        NavEntry::new("Fiches structurées", "/message_structure", "file-alt").requires("LIST_FICHES"),
        NavEntry::new("Formation Continue", "/formation", "chalkboard-teacher")
            .requires("LIST_FORMATIONS")
            .with_children(vec![
                NavEntry::new("Formation", "/formation", "chalkboard-teacher")
                    .requires("LIST_FORMATIONS"),
                NavEntry::new("Catégorie", "/categorie", "tags")
                    .requires("LIST_FORMATION_CATEGORIES"),
            ]),
        NavEntry::new("Vidéos Educatives", "/videos", "video")
            .requires("LIST_VIDEOS")
            .with_children(vec![
                NavEntry::new("Vidéos Educatives", "/videos", "video").requires("LIST_VIDEOS"),
                NavEntry::new("Catégorie", "/categorie_video", "tags")
                    .requires("LIST_VIDEO_CATEGORIES"),
            ]),
        NavEntry::new("Synchronisation", "/synchronisation", "sync-alt").requires("SYNCHRONISATION"),
        NavEntry::new("Administration", "/admin", "user-shield")
            .requires(["LIST_USERS", "LIST_ROLES"])
            .with_children(vec![
                NavEntry::new("Utilisateurs", "/admin_users", "users").requires("LIST_USERS"),
                NavEntry::new("Rôles", "/admin_roles", "key").requires("LIST_ROLES"),
                NavEntry::new("Permissions", "/permissions", "lock").requires("LIST_PERMISSIONS"),
            ]),
    ]
}
