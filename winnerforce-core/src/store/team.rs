//! Ambassador-to-team assignments.

use tracing::debug;

use crate::error::{WinnerforceError, WinnerforceResult};
use crate::store::KeyValueStore;

/// Team membership stored as a JSON list of ambassador ids per team.
#[derive(Debug)]
pub struct TeamAssignments<S> {
    store: S,
}

impl<S: KeyValueStore> TeamAssignments<S> {
    pub fn new(store: S) -> Self {
        TeamAssignments { store }
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    fn key(team_id: &str) -> String {
        format!("team:{}:ambassadors", team_id)
    }

    /// Ambassadors assigned to `team_id`, in assignment order.
    pub fn members(&self, team_id: &str) -> WinnerforceResult<Vec<String>> {
        let key = Self::key(team_id);
        match self.store.get(&key)? {
            Some(raw) => serde_json::from_str(&raw)
                .map_err(|e| WinnerforceError::Store(format!("Invalid value for '{}': {e}", key))),
            None => Ok(Vec::new()),
        }
    }

    pub fn is_member(&self, team_id: &str, ambassador_id: &str) -> WinnerforceResult<bool> {
        Ok(self.members(team_id)?.iter().any(|m| m == ambassador_id))
    }

    /// Add an ambassador to a team. Returns false if already assigned.
    pub fn assign(&mut self, team_id: &str, ambassador_id: &str) -> WinnerforceResult<bool> {
        let mut members = self.members(team_id)?;
        if members.iter().any(|m| m == ambassador_id) {
            return Ok(false);
        }

        members.push(ambassador_id.to_string());
        self.write(team_id, &members)?;
        debug!(team = team_id, ambassador = ambassador_id, "assigned");
        Ok(true)
    }

    /// Remove an ambassador from a team. Returns false if not assigned.
    pub fn unassign(&mut self, team_id: &str, ambassador_id: &str) -> WinnerforceResult<bool> {
        let mut members = self.members(team_id)?;
        let before = members.len();
        members.retain(|m| m != ambassador_id);
        if members.len() == before {
            return Ok(false);
        }

        self.write(team_id, &members)?;
        debug!(team = team_id, ambassador = ambassador_id, "unassigned");
        Ok(true)
    }

    fn write(&mut self, team_id: &str, members: &[String]) -> WinnerforceResult<()> {
        let value = serde_json::to_string(members)?;
        self.store.set(&Self::key(team_id), value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn assign_keeps_order_and_ignores_duplicates() {
        let mut teams = TeamAssignments::new(MemoryStore::new());

        assert!(teams.assign("team-1", "amb-2").unwrap());
        assert!(teams.assign("team-1", "amb-1").unwrap());
        assert!(!teams.assign("team-1", "amb-2").unwrap());

        assert_eq!(teams.members("team-1").unwrap(), vec!["amb-2", "amb-1"]);
        assert!(teams.members("team-2").unwrap().is_empty());
    }

    #[test]
    fn unassign_removes_member() {
        let mut teams = TeamAssignments::new(MemoryStore::new());
        teams.assign("team-1", "amb-1").unwrap();

        assert!(teams.is_member("team-1", "amb-1").unwrap());
        assert!(teams.unassign("team-1", "amb-1").unwrap());
        assert!(!teams.unassign("team-1", "amb-1").unwrap());
        assert!(!teams.is_member("team-1", "amb-1").unwrap());
    }

    #[test]
    fn values_are_plain_json_lists() {
        let mut teams = TeamAssignments::new(MemoryStore::new());
        teams.assign("team-1", "amb-1").unwrap();

        let store = teams.into_inner();
        assert_eq!(
            store.get("team:team-1:ambassadors").unwrap().as_deref(),
            Some(r#"["amb-1"]"#)
        );
    }

    #[test]
    fn corrupt_value_is_reported() {
        let mut store = MemoryStore::new();
        store.set("team:team-1:ambassadors", "not json".to_string()).unwrap();

        let teams = TeamAssignments::new(store);
        assert!(matches!(teams.members("team-1"), Err(WinnerforceError::Store(_))));
    }
}
