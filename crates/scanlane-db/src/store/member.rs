//! # Member Store
//!
//! Membership records keyed by barcode.
//!
//! ```text
//! numeric_barcode,name,tier,points
//! 257274767454,Jane Doe,Platinum,1200
//! ```
//!
//! A row naming an unknown tier is skipped with a warning rather than failing
//! the whole load.

use std::collections::HashMap;
use std::path::Path;

use scanlane_core::{Member, MemberLookup, MembershipTier};
use tracing::{debug, info, warn};

use super::table::{read_file, rows, write_file};
use crate::error::DbResult;

const HEADER: &str = "numeric_barcode,name,tier,points";

#[derive(Debug, Clone, Default)]
pub struct MemberStore {
    members: Vec<Member>,
    index: HashMap<String, usize>,
}

impl MemberStore {
    pub fn load(path: impl AsRef<Path>) -> DbResult<Self> {
        let path = path.as_ref();
        let contents = read_file(path)?;

        let mut store = MemberStore::default();
        for row in rows(path, &contents) {
            let tier_label = row.field(2, "tier")?;
            let tier = match tier_label.parse::<MembershipTier>() {
                Ok(tier) => tier,
                Err(e) => {
                    warn!(path = %path.display(), line = row.line, error = %e, "Skipping member row");
                    continue;
                }
            };
            let member = Member::new(
                row.field(0, "numeric_barcode")?,
                row.field(1, "name")?,
                tier,
                row.parse::<f64>(3, "points")?,
            );
            store.insert(member);
        }

        info!(path = %path.display(), count = store.len(), "Loaded memberships");
        Ok(store)
    }

    pub fn insert(&mut self, member: Member) {
        match self.index.get(&member.barcode) {
            Some(&i) => self.members[i] = member,
            None => {
                self.index.insert(member.barcode.clone(), self.members.len());
                self.members.push(member);
            }
        }
    }

    pub fn get(&self, barcode: &str) -> Option<&Member> {
        self.index.get(barcode).map(|&i| &self.members[i])
    }

    /// Credits points to a member. Unknown barcodes are ignored.
    pub fn add_points(&mut self, barcode: &str, points: f64) {
        if let Some(&i) = self.index.get(barcode) {
            let member = &mut self.members[i];
            member.add_points(points);
            debug!(barcode, points, balance = member.points, "Credited points");
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn save(&self, path: impl AsRef<Path>) -> DbResult<()> {
        let path = path.as_ref();
        write_file(
            path,
            HEADER,
            self.members
                .iter()
                .map(|m| format!("{},{},{},{}", m.barcode, m.name, m.tier_label(), m.points)),
        )?;
        info!(path = %path.display(), count = self.len(), "Saved memberships");
        Ok(())
    }
}

impl MemberLookup for MemberStore {
    fn get_member(&self, code: &str) -> Option<&Member> {
        self.get(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixture;

    #[test]
    fn test_load_fixture_memberships() {
        let store = MemberStore::load(test_fixture("memberships.csv")).unwrap();
        let jane = store.get("257274767454").unwrap();
        assert_eq!(jane.name, "Jane Doe");
        assert_eq!(jane.tier, MembershipTier::Platinum);
        assert_eq!(jane.points, 1200.0);
    }

    #[test]
    fn test_add_points_save_reload() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("updated_memberships.csv");

        let mut store = MemberStore::load(test_fixture("memberships.csv")).unwrap();
        store.add_points("257274767454", 100.0);
        store.save(&out).unwrap();

        let reloaded = MemberStore::load(&out).unwrap();
        assert_eq!(reloaded.get("257274767454").unwrap().points, 1300.0);
        assert_eq!(reloaded.get("213456789010").unwrap().tier, MembershipTier::Gold);
    }

    #[test]
    fn test_unknown_tier_row_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memberships.csv");
        std::fs::write(
            &path,
            "numeric_barcode,name,tier,points\n213456789010,John,Bronze,5\n257274767454,Jane,Gold,7\n",
        )
        .unwrap();

        let store = MemberStore::load(&path).unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.get("213456789010").is_none());
        assert!(store.get("257274767454").is_some());
    }
}
