//! College store - colleges and their departments over two backing files.

use log::{info, warn};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::codec;
use crate::collection::Collection;
use crate::error::StoreError;
use crate::record::Model;
use crate::storage::StorageBackend;

/// A college record. `name` and `abbreviation` are each unique across the
/// collection; `id` is generated and immutable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct College {
    pub id: String,
    pub name: String,
    pub abbreviation: String,
}

impl Model for College {
    const COLLECTION: &'static str = "colleges";
    fn id(&self) -> &str {
        &self.id
    }
}

/// A department record. `college_id` references a [`College`] but is not
/// enforced at write time; a dangling reference joins as an orphan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Department {
    pub id: String,
    pub name: String,
    pub abbreviation: String,
    pub college_id: String,
}

impl Model for Department {
    const COLLECTION: &'static str = "departments";
    fn id(&self) -> &str {
        &self.id
    }
}

/// Fields for creating a college.
#[derive(Debug, Clone, Default)]
pub struct CollegeInput {
    pub name: String,
    pub abbreviation: String,
}

/// Field merge for updating a college; `None` fields keep their value.
#[derive(Debug, Clone, Default)]
pub struct CollegeUpdate {
    pub name: Option<String>,
    pub abbreviation: Option<String>,
}

/// Fields for creating a department.
#[derive(Debug, Clone, Default)]
pub struct DepartmentInput {
    pub name: String,
    pub abbreviation: String,
}

/// Field merge for updating a department; `None` fields keep their value.
#[derive(Debug, Clone, Default)]
pub struct DepartmentUpdate {
    pub name: Option<String>,
    pub abbreviation: Option<String>,
}

/// A college with its departments attached - derived, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollegeWithDepartments {
    pub id: String,
    pub name: String,
    pub abbreviation: String,
    pub departments: Vec<Department>,
}

pub(crate) fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// In-memory store of colleges and departments.
///
/// Every successful mutation rewrites both backing files in full and
/// rebuilds the joined view before returning; the view in [`data`] is
/// always consistent with the collections.
///
/// [`data`]: CollegeStore::data
pub struct CollegeStore<S> {
    storage: S,
    colleges: Collection<College>,
    departments: Collection<Department>,
    data: Vec<CollegeWithDepartments>,
}

impl<S: StorageBackend> CollegeStore<S> {
    /// Create an empty store over the given storage. Call [`load`] to pull
    /// in existing records.
    ///
    /// [`load`]: CollegeStore::load
    pub fn new(storage: S) -> Self {
        CollegeStore {
            storage,
            colleges: Collection::new(),
            departments: Collection::new(),
            data: Vec::new(),
        }
    }

    pub fn find_by_id(&self, id: &str) -> Option<&College> {
        self.colleges.get(id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&College> {
        self.colleges.find(|college| college.name == name)
    }

    pub fn find_by_abbreviation(&self, abbreviation: &str) -> Option<&College> {
        self.colleges.find(|college| college.abbreviation == abbreviation)
    }

    pub fn department(&self, id: &str) -> Option<&Department> {
        self.departments.get(id)
    }

    /// All departments of a college, in insertion order.
    pub fn departments_of(&self, college_id: &str) -> Vec<&Department> {
        self.departments
            .iter()
            .filter(|department| department.college_id == college_id)
            .collect()
    }

    /// The joined view: every college with its departments attached.
    pub fn data(&self) -> &[CollegeWithDepartments] {
        &self.data
    }

    /// Add a college with a generated id. A duplicate name or abbreviation
    /// is rejected without mutating the collection or the backing files.
    pub fn add_college(&mut self, input: CollegeInput) -> Result<College, StoreError> {
        if self.find_by_name(&input.name).is_some() {
            warn!("college name {:?} already exists", input.name);
            return Err(StoreError::duplicate(College::COLLECTION, "name", input.name));
        }
        if self.find_by_abbreviation(&input.abbreviation).is_some() {
            warn!("college abbreviation {:?} already exists", input.abbreviation);
            return Err(StoreError::duplicate(
                College::COLLECTION,
                "abbreviation",
                input.abbreviation,
            ));
        }

        let college = College {
            id: generate_id(),
            name: input.name,
            abbreviation: input.abbreviation,
        };
        self.colleges.insert(college.clone());
        self.persist()?;
        Ok(college)
    }

    /// Merge the supplied fields into an existing college.
    pub fn update_college(&mut self, id: &str, update: CollegeUpdate) -> Result<College, StoreError> {
        let college = self
            .colleges
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found(College::COLLECTION, id))?;
        if let Some(name) = update.name {
            college.name = name;
        }
        if let Some(abbreviation) = update.abbreviation {
            college.abbreviation = abbreviation;
        }
        let updated = college.clone();
        self.persist()?;
        Ok(updated)
    }

    /// Remove a college. Its departments are left in place and join as
    /// orphans until reassigned or deleted.
    pub fn delete_college(&mut self, id: &str) -> Result<College, StoreError> {
        let college = self
            .colleges
            .remove(id)
            .ok_or_else(|| StoreError::not_found(College::COLLECTION, id))?;
        self.persist()?;
        Ok(college)
    }

    /// Add a department under a college, with a generated id. The id guard
    /// only trips if the generated id collides with an existing one.
    pub fn add_department(
        &mut self,
        college_id: &str,
        input: DepartmentInput,
    ) -> Result<Department, StoreError> {
        let department = Department {
            id: generate_id(),
            name: input.name,
            abbreviation: input.abbreviation,
            college_id: college_id.to_string(),
        };
        if !self.departments.insert(department.clone()) {
            warn!("department id {:?} already exists", department.id);
            return Err(StoreError::duplicate(
                Department::COLLECTION,
                "id",
                department.id,
            ));
        }
        self.persist()?;
        Ok(department)
    }

    /// Merge the supplied fields into an existing department.
    pub fn update_department(
        &mut self,
        id: &str,
        update: DepartmentUpdate,
    ) -> Result<Department, StoreError> {
        let department = self
            .departments
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found(Department::COLLECTION, id))?;
        if let Some(name) = update.name {
            department.name = name;
        }
        if let Some(abbreviation) = update.abbreviation {
            department.abbreviation = abbreviation;
        }
        let updated = department.clone();
        self.persist()?;
        Ok(updated)
    }

    pub fn delete_department(&mut self, id: &str) -> Result<Department, StoreError> {
        let department = self
            .departments
            .remove(id)
            .ok_or_else(|| StoreError::not_found(Department::COLLECTION, id))?;
        self.persist()?;
        Ok(department)
    }

    fn rebuild_joins(&mut self) {
        self.data = self
            .colleges
            .iter()
            .map(|college| CollegeWithDepartments {
                id: college.id.clone(),
                name: college.name.clone(),
                abbreviation: college.abbreviation.clone(),
                departments: self
                    .departments
                    .iter()
                    .filter(|department| department.college_id == college.id)
                    .cloned()
                    .collect(),
            })
            .collect();
    }

    /// Load both collections from the backing files and rebuild the join.
    pub fn load(&mut self) -> Result<(), StoreError> {
        let colleges = self.storage.read_collection(College::COLLECTION)?;
        let departments = self.storage.read_collection(Department::COLLECTION)?;

        self.colleges.replace_all(codec::parse_models(&colleges)?);
        self.departments
            .replace_all(codec::parse_models(&departments)?);
        self.rebuild_joins();
        info!(
            "loaded {} colleges, {} departments",
            self.colleges.len(),
            self.departments.len()
        );
        Ok(())
    }

    /// Re-encode both collections, rewrite both backing files whole, and
    /// rebuild the join.
    pub fn persist(&mut self) -> Result<(), StoreError> {
        let colleges = codec::encode_models(self.colleges.iter())?;
        let departments = codec::encode_models(self.departments.iter())?;

        self.storage.write_collection(College::COLLECTION, &colleges)?;
        self.storage
            .write_collection(Department::COLLECTION, &departments)?;
        self.rebuild_joins();
        Ok(())
    }
}
