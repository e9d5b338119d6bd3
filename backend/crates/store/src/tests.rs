//! Repository contract tests, run against `MemoryStore`.
//!
//! `pg_repository_tests` replays the JSONB-specific paths against PostgreSQL;
//! they are ignored by default, run them with
//! `DATABASE_URL=... cargo test -p store -- --ignored`.

#[cfg(test)]
mod fixtures {
    use std::sync::OnceLock;

    use chrono::Utc;
    use platform::password::{ClearTextPassword, HashedPassword};

    use crate::model::User;

    /// Argon2 is slow in debug builds; hash once and share.
    pub fn hashed() -> HashedPassword {
        static HASH: OnceLock<HashedPassword> = OnceLock::new();
        HASH.get_or_init(|| {
            ClearTextPassword::new("password1".to_string())
                .unwrap()
                .hash()
                .unwrap()
        })
        .clone()
    }

    pub fn user(email: &str) -> User {
        User {
            username: email.split('@').next().unwrap_or(email).to_string(),
            email: email.to_string(),
            password: hashed(),
            created_at: Utc::now(),
            links: Vec::new(),
        }
    }
}

#[cfg(test)]
mod user_repository_tests {
    use super::fixtures::user;
    use crate::error::StoreError;
    use crate::memory::MemoryStore;
    use crate::repository::UserRepository;

    #[tokio::test]
    async fn test_create_and_get() {
        let store = MemoryStore::new();
        store.create_user(&user("a@b.com")).await.unwrap();

        let found = store.get_user_by_email("a@b.com").await.unwrap().unwrap();
        assert_eq!(found.username, "a");
        assert!(found.links.is_empty());

        assert!(store.get_user_by_email("x@b.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = MemoryStore::new();
        store.create_user(&user("a@b.com")).await.unwrap();

        let err = store.create_user(&user("a@b.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEmail));
        assert_eq!(store.list_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_user_keeps_links() {
        let store = MemoryStore::new();
        let mut alice = user("a@b.com");
        alice.links.push(crate::model::Link::new("s1", "https://example.com"));
        store.create_user(&alice).await.unwrap();

        alice.username = "alice".to_string();
        alice.links.clear();
        store.update_user(&alice).await.unwrap();

        let found = store.get_user_by_email("a@b.com").await.unwrap().unwrap();
        assert_eq!(found.username, "alice");
        assert_eq!(found.links.len(), 1);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_user() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.update_user(&user("a@b.com")).await,
            Err(StoreError::UserNotFound)
        ));
        assert!(matches!(
            store.delete_user_by_email("a@b.com").await,
            Err(StoreError::UserNotFound)
        ));
    }

    #[tokio::test]
    async fn test_list_users_in_creation_order() {
        let store = MemoryStore::new();
        for email in ["c@x.com", "a@x.com", "b@x.com"] {
            store.create_user(&user(email)).await.unwrap();
        }

        let emails: Vec<_> = store
            .list_users()
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.email)
            .collect();
        assert_eq!(emails, ["c@x.com", "a@x.com", "b@x.com"]);
    }
}

#[cfg(test)]
mod link_repository_tests {
    use chrono::{TimeDelta, Utc};

    use super::fixtures::user;
    use crate::error::StoreError;
    use crate::memory::MemoryStore;
    use crate::model::Link;
    use crate::repository::{LinkRepository, UserRepository};

    async fn store_with(emails: &[&str]) -> MemoryStore {
        let store = MemoryStore::new();
        for email in emails {
            store.create_user(&user(email)).await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_create_and_resolve_globally() {
        let store = store_with(&["a@b.com", "c@d.com"]).await;
        let link = Link::new("abc", "https://example.com");
        store.create_link("a@b.com", &link).await.unwrap();

        assert_eq!(store.get_link_by_slug("abc").await.unwrap(), Some(link));
        assert!(store.get_link_by_slug("zzz").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_slug_unique_across_users() {
        let store = store_with(&["a@b.com", "c@d.com"]).await;
        store
            .create_link("a@b.com", &Link::new("abc", "https://one.example"))
            .await
            .unwrap();

        let err = store
            .create_link("c@d.com", &Link::new("abc", "https://two.example"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateSlug));

        let resolved = store.get_link_by_slug("abc").await.unwrap().unwrap();
        assert_eq!(resolved.original_url, "https://one.example");
        assert!(store.list_links("c@d.com").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_slug_unique_for_same_owner() {
        let store = store_with(&["a@b.com"]).await;
        let first = Link::new("abc", "https://one.example");
        store.create_link("a@b.com", &first).await.unwrap();

        let err = store
            .create_link("a@b.com", &Link::new("abc", "https://two.example"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateSlug));

        assert_eq!(store.list_links("a@b.com").await.unwrap(), vec![first.clone()]);
        assert_eq!(store.get_link_by_slug("abc").await.unwrap(), Some(first));
    }

    #[tokio::test]
    async fn test_create_link_for_missing_user() {
        let store = MemoryStore::new();
        let err = store
            .create_link("ghost@b.com", &Link::new("abc", "https://example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::UserNotFound));
    }

    #[tokio::test]
    async fn test_list_links_in_insertion_order() {
        let store = store_with(&["a@b.com"]).await;
        for slug in ["z", "a", "m"] {
            store
                .create_link("a@b.com", &Link::new(slug, "https://example.com"))
                .await
                .unwrap();
        }

        let slugs: Vec<_> = store
            .list_links("a@b.com")
            .await
            .unwrap()
            .into_iter()
            .map(|l| l.slug)
            .collect();
        assert_eq!(slugs, ["z", "a", "m"]);
    }

    #[tokio::test]
    async fn test_owner_scoped_mutations() {
        let store = store_with(&["a@b.com", "c@d.com"]).await;
        let link = Link::new("abc", "https://example.com");
        store.create_link("a@b.com", &link).await.unwrap();

        let mut changed = link.clone();
        changed.original_url = "https://evil.example".to_string();

        assert!(matches!(
            store.update_link_by_slug("c@d.com", &changed).await,
            Err(StoreError::LinkNotFound)
        ));
        assert!(matches!(
            store.delete_link_by_slug("c@d.com", "abc").await,
            Err(StoreError::LinkNotFound)
        ));

        let resolved = store.get_link_by_slug("abc").await.unwrap().unwrap();
        assert_eq!(resolved, link);
    }

    #[tokio::test]
    async fn test_update_link_fields() {
        let store = store_with(&["a@b.com"]).await;
        let link = Link::new("abc", "https://example.com");
        store.create_link("a@b.com", &link).await.unwrap();

        let mut changed = link.clone();
        changed.original_url = "https://example.org".to_string();
        changed.expired_date = Utc::now() + TimeDelta::days(90);
        changed.created_at = Utc::now() + TimeDelta::days(1);
        store.update_link_by_slug("a@b.com", &changed).await.unwrap();

        let resolved = store.get_link_by_slug("abc").await.unwrap().unwrap();
        assert_eq!(resolved.original_url, "https://example.org");
        assert_eq!(resolved.expired_date, changed.expired_date);
        // created_at is not part of the update
        assert_eq!(resolved.created_at, link.created_at);
    }

    #[tokio::test]
    async fn test_delete_frees_slug() {
        let store = store_with(&["a@b.com", "c@d.com"]).await;
        store
            .create_link("a@b.com", &Link::new("abc", "https://example.com"))
            .await
            .unwrap();
        store.delete_link_by_slug("a@b.com", "abc").await.unwrap();

        assert!(store.get_link_by_slug("abc").await.unwrap().is_none());
        store
            .create_link("c@d.com", &Link::new("abc", "https://example.org"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_delete_user_removes_links() {
        let store = store_with(&["a@b.com"]).await;
        store
            .create_link("a@b.com", &Link::new("abc", "https://example.com"))
            .await
            .unwrap();
        store.delete_user_by_email("a@b.com").await.unwrap();

        assert!(store.get_link_by_slug("abc").await.unwrap().is_none());
        assert!(matches!(
            store.list_links("a@b.com").await,
            Err(StoreError::UserNotFound)
        ));
    }
}

#[cfg(test)]
mod pg_repository_tests {
    use chrono::{TimeDelta, Utc};
    use platform::password::ClearTextPassword;
    use sqlx::PgPool;

    use super::fixtures::user;
    use crate::error::StoreError;
    use crate::model::Link;
    use crate::postgres::{PgStore, StoreConfig};
    use crate::repository::{LinkRepository, UserRepository};

    async fn store_with(pool: PgPool, emails: &[&str]) -> PgStore {
        let store = PgStore::new(pool, StoreConfig::default());
        for email in emails {
            store.create_user(&user(email)).await.unwrap();
        }
        store
    }

    async fn seed_slugs(store: &PgStore, owner: &str, slugs: &[&str]) -> Vec<Link> {
        let mut links = Vec::new();
        for slug in slugs {
            let link = Link::new(*slug, format!("https://{slug}.example"));
            store.create_link(owner, &link).await.unwrap();
            links.push(link);
        }
        links
    }

    async fn slugs_of(store: &PgStore, owner: &str) -> Vec<String> {
        store
            .list_links(owner)
            .await
            .unwrap()
            .into_iter()
            .map(|link| link.slug)
            .collect()
    }

    #[sqlx::test(migrations = "../../../database/migrations")]
    #[ignore = "needs a PostgreSQL DATABASE_URL"]
    async fn test_user_document_roundtrip(pool: PgPool) {
        let store = store_with(pool, &["a@b.com"]).await;

        assert!(matches!(
            store.create_user(&user("a@b.com")).await,
            Err(StoreError::DuplicateEmail)
        ));

        let found = store.get_user_by_email("a@b.com").await.unwrap().unwrap();
        assert_eq!(found.username, "a");
        assert!(found.links.is_empty());
        assert!(found.verify_password(&ClearTextPassword::new_unchecked("password1".into())));
    }

    #[sqlx::test(migrations = "../../../database/migrations")]
    #[ignore = "needs a PostgreSQL DATABASE_URL"]
    async fn test_duplicate_slug_rolls_back(pool: PgPool) {
        let store = store_with(pool, &["a@b.com", "c@d.com"]).await;
        let first = seed_slugs(&store, "a@b.com", &["abc"]).await;

        for owner in ["a@b.com", "c@d.com"] {
            let err = store
                .create_link(owner, &Link::new("abc", "https://other.example"))
                .await
                .unwrap_err();
            assert!(matches!(err, StoreError::DuplicateSlug), "{owner}");
        }

        assert_eq!(store.list_links("a@b.com").await.unwrap(), first);
        assert!(store.list_links("c@d.com").await.unwrap().is_empty());
        assert_eq!(
            store.get_link_by_slug("abc").await.unwrap().unwrap().original_url,
            "https://abc.example"
        );
    }

    #[sqlx::test(migrations = "../../../database/migrations")]
    #[ignore = "needs a PostgreSQL DATABASE_URL"]
    async fn test_update_is_owner_scoped_and_keeps_order(pool: PgPool) {
        let store = store_with(pool, &["a@b.com", "c@d.com"]).await;
        let links = seed_slugs(&store, "a@b.com", &["z", "a", "m"]).await;

        let mut changed = links[1].clone();
        changed.original_url = "https://changed.example".to_string();
        changed.expired_date = Utc::now() + TimeDelta::days(90);

        assert!(matches!(
            store.update_link_by_slug("c@d.com", &changed).await,
            Err(StoreError::LinkNotFound)
        ));
        assert_eq!(store.list_links("a@b.com").await.unwrap(), links);

        store.update_link_by_slug("a@b.com", &changed).await.unwrap();

        let stored = store.list_links("a@b.com").await.unwrap();
        assert_eq!(slugs_of(&store, "a@b.com").await, ["z", "a", "m"]);
        assert_eq!(stored[0], links[0]);
        assert_eq!(stored[1], changed);
        assert_eq!(stored[2], links[2]);

        let mut missing = changed.clone();
        missing.slug = "nope".to_string();
        assert!(matches!(
            store.update_link_by_slug("a@b.com", &missing).await,
            Err(StoreError::LinkNotFound)
        ));
    }

    #[sqlx::test(migrations = "../../../database/migrations")]
    #[ignore = "needs a PostgreSQL DATABASE_URL"]
    async fn test_delete_is_owner_scoped_and_keeps_order(pool: PgPool) {
        let store = store_with(pool, &["a@b.com", "c@d.com"]).await;
        seed_slugs(&store, "a@b.com", &["z", "a", "m"]).await;

        assert!(matches!(
            store.delete_link_by_slug("c@d.com", "a").await,
            Err(StoreError::LinkNotFound)
        ));
        assert_eq!(slugs_of(&store, "a@b.com").await, ["z", "a", "m"]);

        store.delete_link_by_slug("a@b.com", "a").await.unwrap();
        assert_eq!(slugs_of(&store, "a@b.com").await, ["z", "m"]);
        assert!(store.get_link_by_slug("a").await.unwrap().is_none());

        // The slug is free again, for anyone
        seed_slugs(&store, "c@d.com", &["a"]).await;

        store.delete_link_by_slug("a@b.com", "z").await.unwrap();
        store.delete_link_by_slug("a@b.com", "m").await.unwrap();
        assert!(store.list_links("a@b.com").await.unwrap().is_empty());
    }
}
