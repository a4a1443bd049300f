//! Edit context - which records an edit workflow is targeting.

use crate::college::{College, CollegeStore, Department};
use crate::error::StoreError;
use crate::record::Model;
use crate::storage::StorageBackend;
use crate::student::{Student, StudentStore};

/// Tracks the records an edit workflow is targeting.
///
/// A populated selection switches the corresponding form into edit mode; an
/// empty one means create mode. The context is a plain value owned by the
/// calling workflow rather than shared store state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditContext {
    selected_college: Option<String>,
    selected_department: Option<String>,
    selected_student: Option<String>,
}

impl EditContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a college for editing. Fails when the id is unknown.
    pub fn select_college<S: StorageBackend>(
        &mut self,
        store: &CollegeStore<S>,
        id: &str,
    ) -> Result<College, StoreError> {
        let college = store
            .find_by_id(id)
            .ok_or_else(|| StoreError::not_found(College::COLLECTION, id))?
            .clone();
        self.selected_college = Some(college.id.clone());
        Ok(college)
    }

    /// Select a department for editing. Fails when the id is unknown.
    pub fn select_department<S: StorageBackend>(
        &mut self,
        store: &CollegeStore<S>,
        id: &str,
    ) -> Result<Department, StoreError> {
        let department = store
            .department(id)
            .ok_or_else(|| StoreError::not_found(Department::COLLECTION, id))?
            .clone();
        self.selected_department = Some(department.id.clone());
        Ok(department)
    }

    /// Select a student for editing. Fails when the id is unknown.
    pub fn select_student<S: StorageBackend>(
        &mut self,
        store: &StudentStore<S>,
        student_id: &str,
    ) -> Result<Student, StoreError> {
        let student = store
            .find_by_id(student_id)
            .ok_or_else(|| StoreError::not_found(Student::COLLECTION, student_id))?
            .clone();
        self.selected_student = Some(student.student_id.clone());
        Ok(student)
    }

    pub fn college_id(&self) -> Option<&str> {
        self.selected_college.as_deref()
    }

    pub fn department_id(&self) -> Option<&str> {
        self.selected_department.as_deref()
    }

    pub fn student_id(&self) -> Option<&str> {
        self.selected_student.as_deref()
    }

    pub fn clear_college(&mut self) {
        self.selected_college = None;
    }

    pub fn clear_department(&mut self) {
        self.selected_department = None;
    }

    pub fn clear_student(&mut self) {
        self.selected_student = None;
    }

    /// Drop every selection, returning the context to create mode.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
