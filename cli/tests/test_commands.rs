//! Integration tests for CLI commands.

#[cfg(test)]
mod tests {
    use std::path::Path;

    use anyhow::Result;
    use clap::Parser;
    use lf_cli::{cli::Cli, commands};
    use tempfile::TempDir;

    async fn lf(store: &Path, args: &[&str]) -> Result<String> {
        let store = store.to_string_lossy().into_owned();
        let argv = ["lf-cli", "--store-dir", store.as_str()]
            .into_iter()
            .chain(args.iter().copied());
        let cli = Cli::try_parse_from(argv)?;
        let mut out = Vec::new();
        commands::run_with_output(cli, &mut out).await?;
        Ok(String::from_utf8(out)?)
    }

    async fn logged_in() -> TempDir {
        let dir = TempDir::new().expect("temp dir");
        lf(dir.path(), &["login", "--password", "admin123"])
            .await
            .expect("login");
        dir
    }

    #[tokio::test]
    async fn load_seeds_an_empty_store() {
        let dir = TempDir::new().expect("temp dir");
        let out = lf(dir.path(), &["load"]).await.expect("load");

        assert!(out.contains("articles: 5 (4 published, 1 drafts)"), "{out}");
        assert!(out.contains("comments: 4 (1 pending)"), "{out}");
        assert!(out.contains("session: none"), "{out}");
        for kind in ["articles", "comments", "users", "config", "stats"] {
            assert!(dir.path().join(format!("blog_{kind}.json")).exists(), "{kind}");
        }
    }

    #[tokio::test]
    async fn public_listing_hides_drafts() {
        let dir = TempDir::new().expect("temp dir");
        let out = lf(dir.path(), &["articles"]).await.expect("articles");
        assert_eq!(out.lines().count(), 4);
        assert!(!out.contains("[draft]"));

        let out = lf(dir.path(), &["articles", "--category", "Design"])
            .await
            .expect("filtered");
        assert_eq!(out.lines().count(), 1);
        assert!(out.contains("Design"));
    }

    #[tokio::test]
    async fn likes_persist_between_runs() {
        let dir = TempDir::new().expect("temp dir");
        let out = lf(dir.path(), &["like", "1"]).await.expect("like");
        assert!(out.contains("(97 likes)"), "{out}");

        let out = lf(dir.path(), &["like", "1"]).await.expect("like again");
        assert!(out.contains("(98 likes)"), "{out}");
    }

    #[tokio::test]
    async fn liking_a_missing_article_fails() {
        let dir = TempDir::new().expect("temp dir");
        let err = lf(dir.path(), &["like", "missing"]).await.unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[tokio::test]
    async fn login_rejects_wrong_password() {
        let dir = TempDir::new().expect("temp dir");
        assert!(lf(dir.path(), &["login", "--password", "nope"]).await.is_err());
        let out = lf(dir.path(), &["whoami"]).await.expect("whoami");
        assert_eq!(out.trim(), "not logged in");
    }

    #[tokio::test]
    async fn session_survives_until_logout() {
        let dir = logged_in().await;
        let out = lf(dir.path(), &["whoami"]).await.expect("whoami");
        assert!(out.starts_with("admin <"), "{out}");

        lf(dir.path(), &["logout"]).await.expect("logout");
        let out = lf(dir.path(), &["whoami"]).await.expect("whoami");
        assert_eq!(out.trim(), "not logged in");
    }

    #[tokio::test]
    async fn admin_commands_require_login() {
        let dir = TempDir::new().expect("temp dir");
        for args in [
            vec!["publish", "5"],
            vec!["delete-article", "1"],
            vec!["approve", "c3"],
            vec!["comments"],
            vec!["reset"],
            vec!["config", "set", "site.title", "x"],
        ] {
            let err = lf(dir.path(), &args).await.unwrap_err();
            assert!(err.to_string().contains("not logged in"), "{args:?}: {err}");
        }
    }

    #[tokio::test]
    async fn publishing_a_draft_makes_it_public() {
        let dir = logged_in().await;
        let out = lf(dir.path(), &["publish", "5"]).await.expect("publish");
        assert_eq!(out.trim(), "5 is now published");

        let out = lf(dir.path(), &["show", "notes-on-comment-moderation"])
            .await
            .expect("show");
        assert!(out.starts_with("# "), "{out}");
    }

    #[tokio::test]
    async fn drafts_are_not_reachable_by_slug() {
        let dir = TempDir::new().expect("temp dir");
        assert!(lf(dir.path(), &["show", "notes-on-comment-moderation"]).await.is_err());
    }

    #[tokio::test]
    async fn write_article_creates_and_updates() {
        let dir = logged_in().await;
        let file = dir.path().join("post.md");
        std::fs::write(
            &file,
            "---\ntitle: \"Fresh Post\"\ncategory: \"Rust\"\ntags: [rust]\n---\n\nHello there.\n",
        )
        .expect("write markdown");
        let file_arg = file.to_string_lossy().into_owned();

        let out = lf(dir.path(), &["write-article", "--file", &file_arg, "--publish"])
            .await
            .expect("create");
        assert!(out.starts_with("created article "), "{out}");
        assert!(out.contains("(fresh-post)"), "{out}");

        let out = lf(dir.path(), &["show", "fresh-post"]).await.expect("show");
        assert!(out.contains("Hello there."));
        assert!(out.contains("Lin Chen"), "{out}");

        let out = lf(dir.path(), &[
            "write-article",
            "--file",
            &file_arg,
            "--id",
            "2",
            "--title",
            "Renamed",
        ])
        .await
        .expect("update");
        assert!(out.starts_with("updated article 2"), "{out}");
        let out = lf(dir.path(), &["articles", "--admin"]).await.expect("admin list");
        assert!(out.contains("Renamed"));
        assert!(out.contains("6 shown"), "{out}");
    }

    #[tokio::test]
    async fn comments_replies_and_moderation() {
        let dir = logged_in().await;
        let out = lf(dir.path(), &[
            "comment",
            "1",
            "--author",
            "Ana",
            "--email",
            "ana@example.com",
            "--content",
            "Great read",
        ])
        .await
        .expect("comment");
        assert!(out.starts_with("posted comment "));

        lf(dir.path(), &["reply", "c2", "--content", "Agreed"])
            .await
            .expect("reply");
        lf(dir.path(), &["approve", "c3"]).await.expect("approve");

        let out = lf(dir.path(), &["comments", "--status", "pending"])
            .await
            .expect("queue");
        assert!(out.contains("0 shown | 5 total, 5 approved, 0 pending"), "{out}");

        let out = lf(dir.path(), &["comments", "--search", "agreed"])
            .await
            .expect("search");
        assert!(out.contains("0 shown"), "{out}");

        lf(dir.path(), &["reject", "c1"]).await.expect("reject");
        lf(dir.path(), &["delete-comment", "c4"]).await.expect("delete");
        let out = lf(dir.path(), &["comments"]).await.expect("all");
        assert!(out.contains("4 total, 3 approved, 1 pending"), "{out}");
    }

    #[tokio::test]
    async fn commenting_needs_every_field() {
        let dir = TempDir::new().expect("temp dir");
        let err = lf(dir.path(), &[
            "comment", "1", "--author", "Ana", "--email", " ", "--content", "Hi",
        ])
        .await
        .unwrap_err();
        assert!(err.to_string().contains("`email` is required"), "{err}");
    }

    #[tokio::test]
    async fn config_get_and_set() {
        let dir = logged_in().await;
        lf(dir.path(), &["config", "set", "site.title", "Night Notes"])
            .await
            .expect("set");
        let out = lf(dir.path(), &["config", "get", "site.title"])
            .await
            .expect("get");
        assert_eq!(out.trim(), "Night Notes");

        assert!(lf(dir.path(), &["config", "set", "site.nope", "x"]).await.is_err());
        assert!(lf(dir.path(), &["config", "get", "site.nope"]).await.is_err());
    }

    #[tokio::test]
    async fn reset_restores_seeds_and_keeps_login() {
        let dir = logged_in().await;
        lf(dir.path(), &["delete-article", "1"]).await.expect("delete");

        let out = lf(dir.path(), &["reset"]).await.expect("reset");
        assert!(out.contains("articles: 5"), "{out}");
        assert!(out.contains("session: admin"), "{out}");
    }

    #[tokio::test]
    async fn raw_dispatch_applies_known_actions_only() {
        let dir = logged_in().await;
        let out = lf(dir.path(), &["dispatch", r#"{"type":"DELETE_ARTICLE","payload":"4"}"#])
            .await
            .expect("dispatch");
        assert_eq!(out.trim(), "dispatched DELETE_ARTICLE");

        let out = lf(dir.path(), &["dispatch", r#"{"type":"SOMETHING_ELSE"}"#])
            .await
            .expect("unknown");
        assert!(out.contains("state unchanged"));

        let out = lf(dir.path(), &["dispatch", r#"{"type":"ARCHIVE_ALL","payload":{"id":"1"}}"#])
            .await
            .expect("unknown with payload");
        assert_eq!(out.trim(), "unknown action kind; state unchanged");

        let out = lf(dir.path(), &["load"]).await.expect("load");
        assert!(out.contains("articles: 4"), "{out}");
    }

    #[tokio::test]
    async fn corrupt_documents_are_reseeded() {
        let dir = TempDir::new().expect("temp dir");
        std::fs::write(dir.path().join("blog_articles.json"), "{not json").expect("corrupt");
        let out = lf(dir.path(), &["load"]).await.expect("load");
        assert!(out.contains("articles: 5"), "{out}");
    }

    #[tokio::test]
    async fn missing_seed_dir_fails_the_load() {
        let dir = TempDir::new().expect("temp dir");
        let seeds = dir.path().join("no-seeds");
        let seeds = seeds.to_string_lossy().into_owned();
        let err = lf(dir.path(), &["--seed-dir", &seeds, "load"]).await.unwrap_err();
        assert!(err.to_string().contains("failed to load blog data"), "{err}");
    }

    #[tokio::test]
    async fn stats_compares_snapshot_with_live_counts() {
        let dir = TempDir::new().expect("temp dir");
        let out = lf(dir.path(), &["stats"]).await.expect("stats");
        assert!(out.starts_with("metric"));
        assert!(out.contains("weekly views:"));
        let live_articles = out
            .lines()
            .find(|line| line.starts_with("articles "))
            .expect("articles row");
        assert!(live_articles.trim_end().ends_with('5'), "{live_articles}");
    }
}
