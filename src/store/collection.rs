use crate::error::StoreError;
use crate::models::Record;

use super::ids::next_id;

/// Ordered, id-addressed list of one entity type. Insertion order is kept.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection<T> {
    items: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Record> Collection<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn list(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find_by_id(&self, id: u64) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn next_id(&self) -> Option<u64> {
        next_id(self.items.iter().map(Record::id))
    }

    /// Build a record from `draft` under a freshly allocated id and append it.
    pub fn insert(&mut self, draft: T::Draft) -> Result<&T, StoreError> {
        let id = self.next_id().ok_or(StoreError::IdsExhausted {
            entity_type: T::ENTITY_TYPE,
        })?;
        let record = T::from_draft(id, draft)?;
        self.items.push(record);
        let last = self.items.len() - 1;
        Ok(&self.items[last])
    }

    pub fn update(&mut self, id: u64, patch: T::Patch) -> Result<&T, StoreError> {
        let record = self
            .items
            .iter_mut()
            .find(|item| item.id() == id)
            .ok_or(StoreError::NotFound {
                entity_type: T::ENTITY_TYPE,
                id,
            })?;
        record.apply(patch)?;
        Ok(&*record)
    }

    pub fn remove(&mut self, id: u64) -> Result<T, StoreError> {
        let index = self
            .items
            .iter()
            .position(|item| item.id() == id)
            .ok_or(StoreError::NotFound {
                entity_type: T::ENTITY_TYPE,
                id,
            })?;
        Ok(self.items.remove(index))
    }

    /// Drop every record matching `doomed`; returns how many went.
    pub fn remove_where<F>(&mut self, mut doomed: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let before = self.items.len();
        self.items.retain(|item| !doomed(item));
        before - self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Doctor, DoctorPatch, NewDoctor};

    fn new_doctor(name: &str) -> NewDoctor {
        NewDoctor {
            name: name.into(),
            specialization: "Cardiology".into(),
            contact: "555".into(),
            email: "d@hospital.com".into(),
        }
    }

    #[test]
    fn insert_allocates_sequential_ids() {
        let mut doctors = Collection::<Doctor>::default();
        assert_eq!(doctors.insert(new_doctor("A")).unwrap().id, 1);
        assert_eq!(doctors.insert(new_doctor("B")).unwrap().id, 2);
        assert_eq!(doctors.len(), 2);
    }

    #[test]
    fn insert_after_remove_uses_max_plus_one() {
        let mut doctors = Collection::<Doctor>::default();
        doctors.insert(new_doctor("A")).unwrap();
        doctors.insert(new_doctor("B")).unwrap();
        doctors.insert(new_doctor("C")).unwrap();
        doctors.remove(2).unwrap();
        assert_eq!(doctors.insert(new_doctor("D")).unwrap().id, 4);
    }

    #[test]
    fn invalid_draft_is_not_appended() {
        let mut doctors = Collection::<Doctor>::default();
        assert!(doctors.insert(new_doctor("")).is_err());
        assert!(doctors.is_empty());
    }

    #[test]
    fn insert_past_largest_id_fails_cleanly() {
        let last = Doctor::from_draft(u64::MAX, new_doctor("A")).unwrap();
        let mut doctors = Collection::new(vec![last]);
        let err = doctors.insert(new_doctor("B")).unwrap_err();
        assert!(matches!(
            err,
            StoreError::IdsExhausted {
                entity_type: "Doctor"
            }
        ));
        assert_eq!(doctors.len(), 1);
    }

    #[test]
    fn update_missing_id_is_not_found() {
        let mut doctors = Collection::<Doctor>::default();
        let err = doctors.update(9, DoctorPatch::default()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn remove_missing_id_is_not_found() {
        let mut doctors = Collection::<Doctor>::default();
        doctors.insert(new_doctor("A")).unwrap();
        assert!(doctors.remove(5).unwrap_err().is_not_found());
        assert_eq!(doctors.len(), 1);
    }

    #[test]
    fn remove_where_reports_count_and_keeps_order() {
        let mut doctors = Collection::<Doctor>::default();
        for name in ["A", "B", "C", "D"] {
            doctors.insert(new_doctor(name)).unwrap();
        }
        assert_eq!(doctors.remove_where(|d| d.id % 2 == 0), 2);
        let names: Vec<_> = doctors.list().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);
    }
}
