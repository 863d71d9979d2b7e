use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tg_store::{read_json, write_json, SharedStore, LAST_PROJECT_KEY, PROJECTS_KEY};

use crate::ids::IdGenerator;

/// A durable reference to an external repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub repo_url: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter a repository URL.")]
    EmptyInput,
    #[error("Please enter a valid repository URL ({marker}).")]
    UnrecognizedHost { marker: String },
}

impl ValidationError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::EmptyInput => "EMPTY_INPUT",
            ValidationError::UnrecognizedHost { .. } => "UNRECOGNIZED_HOST",
        }
    }
}

/// `owner/repo` from the two path segments following `host_marker`, with a
/// trailing `.git` dropped. Anything that doesn't have that shape yields the
/// URL unchanged.
pub fn extract_repo_name(repo_url: &str, host_marker: &str) -> String {
    let fallback = || repo_url.to_string();
    let Some(start) = repo_url.find(host_marker) else {
        return fallback();
    };
    let Some(path) = repo_url[start + host_marker.len()..].strip_prefix('/') else {
        return fallback();
    };
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let mut segments = path.split('/');
    let owner = segments.next().unwrap_or_default();
    let repo = segments.next().unwrap_or_default();
    let repo = repo.strip_suffix(".git").unwrap_or(repo);
    if owner.is_empty() || repo.is_empty() {
        return fallback();
    }
    format!("{owner}/{repo}")
}

/// Target for the embedded repository preview.
pub fn readme_url(repo_url: &str, host_marker: &str) -> String {
    if repo_url.contains(host_marker) {
        format!("{repo_url}#readme")
    } else {
        repo_url.to_string()
    }
}

#[derive(Debug, Default)]
struct Snapshot {
    projects: Vec<Project>,
    last_visited: Option<String>,
}

/// Owns the durable project list and the last-visited pointer.
///
/// The store is read on first access; after that reads come from memory and
/// every mutation writes the whole list back.
pub struct ProjectRepository {
    store: SharedStore,
    host_marker: String,
    ids: IdGenerator,
    snapshot: Option<Snapshot>,
}

impl ProjectRepository {
    pub fn new(store: SharedStore, host_marker: impl Into<String>) -> Self {
        Self {
            store,
            host_marker: host_marker.into(),
            ids: IdGenerator::new(),
            snapshot: None,
        }
    }

    pub fn host_marker(&self) -> &str {
        &self.host_marker
    }

    pub fn list_projects(&mut self) -> &[Project] {
        &self.snapshot().projects
    }

    pub fn get_project(&mut self, id: &str) -> Option<&Project> {
        self.snapshot().projects.iter().find(|p| p.id == id)
    }

    pub fn add_project(&mut self, repo_url: &str) -> Result<Project, ValidationError> {
        let repo_url = repo_url.trim();
        if repo_url.is_empty() {
            return Err(ValidationError::EmptyInput);
        }
        if !repo_url.contains(&self.host_marker) {
            return Err(ValidationError::UnrecognizedHost {
                marker: self.host_marker.clone(),
            });
        }

        // Loading the snapshot seeds the id sequence with the stored ids.
        self.snapshot();
        let project = Project {
            id: self.ids.next_id(),
            repo_url: repo_url.to_string(),
            name: extract_repo_name(repo_url, &self.host_marker),
        };
        self.snapshot().projects.push(project.clone());
        self.persist_projects();
        tracing::info!(project_id = %project.id, name = %project.name, "Project added");
        Ok(project)
    }

    /// Remove a project. Callers are expected to have obtained the user's
    /// confirmation. Unknown ids are a no-op.
    pub fn delete_project(&mut self, id: &str) -> Option<Project> {
        let snapshot = self.snapshot();
        let index = snapshot.projects.iter().position(|p| p.id == id)?;
        let removed = snapshot.projects.remove(index);

        let repoint = snapshot.last_visited.as_deref() == Some(id);
        if repoint {
            snapshot.last_visited = snapshot.projects.first().map(|p| p.id.clone());
        }

        self.persist_projects();
        if repoint {
            self.persist_last_visited();
        }
        tracing::info!(project_id = %id, "Project deleted");
        Some(removed)
    }

    pub fn last_visited(&mut self) -> Option<&Project> {
        let snapshot = self.snapshot();
        let id = snapshot.last_visited.as_deref()?;
        snapshot.projects.iter().find(|p| p.id == id)
    }

    /// Point the last-visited marker at `id`. Returns `false` (and changes
    /// nothing) when no such project exists.
    pub fn record_visit(&mut self, id: &str) -> bool {
        let snapshot = self.snapshot();
        if !snapshot.projects.iter().any(|p| p.id == id) {
            return false;
        }
        if snapshot.last_visited.as_deref() == Some(id) {
            return true;
        }
        snapshot.last_visited = Some(id.to_string());
        self.persist_last_visited();
        tracing::debug!(project_id = %id, "Recorded last visited project");
        true
    }

    /// Throw away the in-memory copy and read the store again.
    pub fn reload(&mut self) {
        self.store.refresh();
        self.snapshot = None;
        let count = self.snapshot().projects.len();
        tracing::debug!(count, "Reloaded projects from store");
    }

    fn snapshot(&mut self) -> &mut Snapshot {
        if self.snapshot.is_none() {
            let loaded = self.load();
            self.snapshot = Some(loaded);
        }
        self.snapshot.get_or_insert_with(Snapshot::default)
    }

    fn load(&self) -> Snapshot {
        let stored: Vec<Project> = read_json(&*self.store, PROJECTS_KEY).unwrap_or_default();
        let mut seen = HashSet::new();
        let mut projects = Vec::with_capacity(stored.len());
        for project in stored {
            if !seen.insert(project.id.clone()) {
                tracing::warn!(project_id = %project.id, "Dropping duplicate stored project");
                continue;
            }
            self.ids.observe(&project.id);
            projects.push(project);
        }

        let mut last_visited: Option<String> = read_json(&*self.store, LAST_PROJECT_KEY);
        if let Some(id) = last_visited.as_deref() {
            if !seen.contains(id) {
                tracing::warn!(project_id = %id, "Clearing dangling last visited project");
                last_visited = None;
                if let Err(e) = self.store.remove(LAST_PROJECT_KEY) {
                    tracing::warn!("Failed to clear last visited project: {}", e);
                }
            }
        }

        Snapshot {
            projects,
            last_visited,
        }
    }

    fn persist_projects(&self) {
        let Some(snapshot) = &self.snapshot else {
            return;
        };
        if let Err(e) = write_json(&*self.store, PROJECTS_KEY, &snapshot.projects) {
            tracing::warn!(code = e.error_code(), "Failed to persist projects: {}", e);
        }
    }

    fn persist_last_visited(&self) {
        let Some(snapshot) = &self.snapshot else {
            return;
        };
        let result = match &snapshot.last_visited {
            Some(id) => write_json(&*self.store, LAST_PROJECT_KEY, id),
            None => self.store.remove(LAST_PROJECT_KEY),
        };
        if let Err(e) = result {
            tracing::warn!(code = e.error_code(), "Failed to persist last visited project: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::sync::Arc;
    use tg_store::{MemoryStore, Store};

    fn setup() -> (Arc<MemoryStore>, ProjectRepository) {
        let store = Arc::new(MemoryStore::new());
        let repo = ProjectRepository::new(store.clone(), "github.com");
        (store, repo)
    }

    fn stored_projects(store: &MemoryStore) -> Vec<Project> {
        serde_json::from_str(&store.get(PROJECTS_KEY).unwrap()).unwrap()
    }

    #[test]
    fn extract_repo_name_shapes() {
        let m = "github.com";
        assert_eq!(extract_repo_name("https://github.com/acme/widgets", m), "acme/widgets");
        assert_eq!(extract_repo_name("https://github.com/acme/widgets/", m), "acme/widgets");
        assert_eq!(extract_repo_name("https://github.com/acme/widgets.git", m), "acme/widgets");
        assert_eq!(
            extract_repo_name("https://github.com/acme/widgets/tree/main?tab=x", m),
            "acme/widgets"
        );
        assert_eq!(extract_repo_name("github.com/acme/widgets#readme", m), "acme/widgets");
        assert_eq!(extract_repo_name("https://github.com/acme", m), "https://github.com/acme");
        assert_eq!(extract_repo_name("git@github.com:acme/w", m), "git@github.com:acme/w");
        assert_eq!(extract_repo_name("https://gitlab.com/a/b", m), "https://gitlab.com/a/b");
    }

    #[test]
    fn readme_url_only_for_recognised_host() {
        assert_eq!(
            readme_url("https://github.com/acme/widgets", "github.com"),
            "https://github.com/acme/widgets#readme"
        );
        assert_eq!(readme_url("https://example.com/x", "github.com"), "https://example.com/x");
    }

    #[test]
    fn add_project_writes_through() {
        let (store, mut repo) = setup();
        let project = repo.add_project("https://github.com/acme/widgets").unwrap();
        assert_eq!(project.name, "acme/widgets");
        assert_eq!(project.repo_url, "https://github.com/acme/widgets");

        let raw: serde_json::Value =
            serde_json::from_str(&store.get(PROJECTS_KEY).unwrap()).unwrap();
        assert_eq!(raw.as_array().unwrap().len(), 1);
        assert_eq!(raw[0]["repoUrl"], "https://github.com/acme/widgets");
        assert_eq!(raw[0]["name"], "acme/widgets");
        assert_eq!(raw[0]["id"], project.id.as_str());
    }

    #[test]
    fn add_project_rejects_blank_input() {
        let (store, mut repo) = setup();
        assert_eq!(repo.add_project("   "), Err(ValidationError::EmptyInput));
        assert!(store.get(PROJECTS_KEY).is_none());
    }

    #[test]
    fn add_project_rejects_unrecognised_host() {
        let (store, mut repo) = setup();
        let err = repo.add_project("not-a-url").unwrap_err();
        assert_eq!(err.error_code(), "UNRECOGNIZED_HOST");
        assert!(store.get(PROJECTS_KEY).is_none());
        assert!(repo.list_projects().is_empty());
    }

    #[test]
    fn list_reads_through_once() {
        let (store, mut repo) = setup();
        write_json(
            &*store,
            PROJECTS_KEY,
            &vec![Project {
                id: "p1".into(),
                repo_url: "https://github.com/a/b".into(),
                name: "a/b".into(),
            }],
        )
        .unwrap();
        assert_eq!(repo.list_projects().len(), 1);

        // Later store writes are not observed until reload
        store.set(PROJECTS_KEY, "[]".to_string()).unwrap();
        assert_eq!(repo.list_projects().len(), 1);
        repo.reload();
        assert!(repo.list_projects().is_empty());
    }

    #[test]
    fn malformed_store_yields_empty_list() {
        let (store, mut repo) = setup();
        store.set(PROJECTS_KEY, "{{garbage".to_string()).unwrap();
        assert!(repo.list_projects().is_empty());

        repo.add_project("https://github.com/acme/widgets").unwrap();
        assert_eq!(stored_projects(&store).len(), 1);
    }

    #[test]
    fn duplicate_stored_ids_are_dropped() {
        let (store, mut repo) = setup();
        let p = Project {
            id: "7".into(),
            repo_url: "https://github.com/a/b".into(),
            name: "a/b".into(),
        };
        write_json(&*store, PROJECTS_KEY, &vec![p.clone(), p]).unwrap();
        assert_eq!(repo.list_projects().len(), 1);
    }

    #[test]
    fn new_ids_never_collide_with_stored_ones() {
        let (store, mut repo) = setup();
        let far_future = (chrono::Utc::now().timestamp_millis() + 10_000_000).to_string();
        write_json(
            &*store,
            PROJECTS_KEY,
            &vec![Project {
                id: far_future.clone(),
                repo_url: "https://github.com/a/b".into(),
                name: "a/b".into(),
            }],
        )
        .unwrap();
        let added = repo.add_project("https://github.com/c/d").unwrap();
        assert!(added.id.parse::<i64>().unwrap() > far_future.parse::<i64>().unwrap());
    }

    #[test]
    fn first_add_after_restart_skips_current_stored_id() {
        let store = Arc::new(MemoryStore::new());
        let stored = chrono::Utc::now().timestamp_millis().to_string();
        write_json(
            &*store,
            PROJECTS_KEY,
            &vec![Project {
                id: stored.clone(),
                repo_url: "https://github.com/a/b".into(),
                name: "a/b".into(),
            }],
        )
        .unwrap();

        let mut repo = ProjectRepository::new(store.clone(), "github.com");
        let added = repo.add_project("https://github.com/c/d").unwrap();
        assert_ne!(added.id, stored);
        let ids: Vec<String> = repo.list_projects().iter().map(|p| p.id.clone()).collect();
        assert_eq!(ids, vec![stored, added.id]);
    }

    #[test]
    fn delete_unknown_is_noop() {
        let (store, mut repo) = setup();
        repo.add_project("https://github.com/a/b").unwrap();
        let before = store.get(PROJECTS_KEY);
        assert!(repo.delete_project("missing").is_none());
        assert_eq!(store.get(PROJECTS_KEY), before);
    }

    #[test]
    fn delete_last_visited_repoints_to_first() {
        let (store, mut repo) = setup();
        let a = repo.add_project("https://github.com/o/a").unwrap();
        let b = repo.add_project("https://github.com/o/b").unwrap();
        assert!(repo.record_visit(&b.id));
        assert_eq!(
            store.get(LAST_PROJECT_KEY).as_deref(),
            Some(format!("\"{}\"", b.id).as_str())
        );

        repo.delete_project(&b.id).unwrap();
        assert_eq!(repo.last_visited().map(|p| p.id.clone()), Some(a.id.clone()));
        assert_eq!(
            store.get(LAST_PROJECT_KEY).as_deref(),
            Some(format!("\"{}\"", a.id).as_str())
        );

        repo.delete_project(&a.id).unwrap();
        assert!(repo.last_visited().is_none());
        assert!(store.get(LAST_PROJECT_KEY).is_none());
    }

    #[test]
    fn delete_other_project_keeps_pointer() {
        let (_store, mut repo) = setup();
        let a = repo.add_project("https://github.com/o/a").unwrap();
        let b = repo.add_project("https://github.com/o/b").unwrap();
        repo.record_visit(&a.id);
        repo.delete_project(&b.id);
        assert_eq!(repo.last_visited().map(|p| p.id.clone()), Some(a.id));
    }

    #[test]
    fn record_visit_unknown_is_rejected() {
        let (store, mut repo) = setup();
        assert!(!repo.record_visit("ghost"));
        assert!(store.get(LAST_PROJECT_KEY).is_none());
    }

    #[test]
    fn dangling_pointer_is_cleared_on_load() {
        let (store, mut repo) = setup();
        write_json(&*store, LAST_PROJECT_KEY, "ghost").unwrap();
        assert!(repo.last_visited().is_none());
        assert!(store.get(LAST_PROJECT_KEY).is_none());
    }

    #[test]
    fn random_add_delete_sequences_keep_order_and_pointer() {
        let mut rng = StdRng::seed_from_u64(0x7067);
        for _ in 0..50 {
            let (store, mut repo) = setup();
            let mut expected: Vec<String> = Vec::new();
            for step in 0..40 {
                if expected.is_empty() || rng.gen_bool(0.6) {
                    let url = format!("https://github.com/o/r{step}");
                    expected.push(repo.add_project(&url).unwrap().id);
                } else {
                    let victim = expected.remove(rng.gen_range(0..expected.len()));
                    if rng.gen_bool(0.5) {
                        repo.record_visit(&victim);
                    }
                    repo.delete_project(&victim).unwrap();
                }
                if !expected.is_empty() && rng.gen_bool(0.3) {
                    let id = expected[rng.gen_range(0..expected.len())].clone();
                    repo.record_visit(&id);
                }

                let ids: Vec<String> = repo.list_projects().iter().map(|p| p.id.clone()).collect();
                assert_eq!(ids, expected);
                let unique: HashSet<&String> = ids.iter().collect();
                assert_eq!(unique.len(), ids.len());

                let persisted: Vec<String> =
                    stored_projects(&store).into_iter().map(|p| p.id).collect();
                assert_eq!(persisted, expected);

                if let Some(last) = read_json::<String>(&*store, LAST_PROJECT_KEY) {
                    assert!(expected.contains(&last));
                }
            }
        }
    }
}
