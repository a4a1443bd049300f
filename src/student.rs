//! Student store and the student-derived display helpers.

use chrono::{Datelike, Local, NaiveDate};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::codec;
use crate::collection::Collection;
use crate::college::{College, Department};
use crate::error::StoreError;
use crate::record::Model;
use crate::storage::StorageBackend;

/// A student record. `student_id` is caller-supplied and is the primary
/// key. `photo` is `"N/A"` or the path of a copied image file; `birthday`
/// and `year` are kept in string form and interpreted by the helpers below.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Student {
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub birthday: String,
    pub photo: String,
    pub college_id: String,
    pub department_id: String,
    pub year: String,
}

impl Model for Student {
    const COLLECTION: &'static str = "students";
    fn id(&self) -> &str {
        &self.student_id
    }
}

/// Field merge for updating a student; `None` fields keep their value. The
/// student id is the key and is not part of the merge.
#[derive(Debug, Clone, Default)]
pub struct StudentUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub birthday: Option<String>,
    pub photo: Option<String>,
    pub college_id: Option<String>,
    pub department_id: Option<String>,
    pub year: Option<String>,
}

/// A student with department and college attached - derived, never
/// persisted. A dangling reference joins as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentWithJoins {
    #[serde(flatten)]
    pub student: Student,
    pub department: Option<Department>,
    pub college: Option<College>,
}

/// In-memory store of students, joined against read-only department and
/// college copies captured at [`load`] time.
///
/// The copies are not live-synchronized with a [`crate::CollegeStore`];
/// after college-side mutations the joins here are stale until the next
/// [`load`].
///
/// [`load`]: StudentStore::load
pub struct StudentStore<S> {
    storage: S,
    students: Collection<Student>,
    departments: Vec<Department>,
    colleges: Vec<College>,
    data: Vec<StudentWithJoins>,
}

impl<S: StorageBackend> StudentStore<S> {
    /// Create an empty store over the given storage. Call [`load`] to pull
    /// in existing records.
    ///
    /// [`load`]: StudentStore::load
    pub fn new(storage: S) -> Self {
        StudentStore {
            storage,
            students: Collection::new(),
            departments: Vec::new(),
            colleges: Vec::new(),
            data: Vec::new(),
        }
    }

    pub fn find_by_id(&self, student_id: &str) -> Option<&Student> {
        self.students.get(student_id)
    }

    pub fn department(&self, id: &str) -> Option<&Department> {
        self.departments.iter().find(|department| department.id == id)
    }

    pub fn college(&self, id: &str) -> Option<&College> {
        self.colleges.iter().find(|college| college.id == id)
    }

    /// The joined view: every student with department and college attached.
    pub fn data(&self) -> &[StudentWithJoins] {
        &self.data
    }

    /// Add a student under its caller-supplied id. A duplicate id is
    /// rejected without mutating the collection or the backing file.
    pub fn add_student(&mut self, student: Student) -> Result<(), StoreError> {
        if self.students.contains(&student.student_id) {
            warn!("student id {:?} already exists", student.student_id);
            return Err(StoreError::duplicate(
                Student::COLLECTION,
                "student_id",
                student.student_id,
            ));
        }
        self.students.insert(student);
        self.persist()?;
        Ok(())
    }

    /// Merge the supplied fields into an existing student.
    pub fn update_student(
        &mut self,
        student_id: &str,
        update: StudentUpdate,
    ) -> Result<Student, StoreError> {
        let student = self
            .students
            .get_mut(student_id)
            .ok_or_else(|| StoreError::not_found(Student::COLLECTION, student_id))?;

        if let Some(first_name) = update.first_name {
            student.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            student.last_name = last_name;
        }
        if let Some(gender) = update.gender {
            student.gender = gender;
        }
        if let Some(birthday) = update.birthday {
            student.birthday = birthday;
        }
        if let Some(photo) = update.photo {
            student.photo = photo;
        }
        if let Some(college_id) = update.college_id {
            student.college_id = college_id;
        }
        if let Some(department_id) = update.department_id {
            student.department_id = department_id;
        }
        if let Some(year) = update.year {
            student.year = year;
        }

        let updated = student.clone();
        self.persist()?;
        Ok(updated)
    }

    pub fn delete_student(&mut self, student_id: &str) -> Result<Student, StoreError> {
        let student = self
            .students
            .remove(student_id)
            .ok_or_else(|| StoreError::not_found(Student::COLLECTION, student_id))?;
        self.persist()?;
        Ok(student)
    }

    fn rebuild_joins(&mut self) {
        self.data = self
            .students
            .iter()
            .map(|student| StudentWithJoins {
                student: student.clone(),
                department: self
                    .departments
                    .iter()
                    .find(|department| department.id == student.department_id)
                    .cloned(),
                college: self
                    .colleges
                    .iter()
                    .find(|college| college.id == student.college_id)
                    .cloned(),
            })
            .collect();
    }

    /// Load students plus the read-only department and college join inputs,
    /// then rebuild the join. Only the student collection is authoritative
    /// here.
    pub fn load(&mut self) -> Result<(), StoreError> {
        let students = self.storage.read_collection(Student::COLLECTION)?;
        let departments = self.storage.read_collection(Department::COLLECTION)?;
        let colleges = self.storage.read_collection(College::COLLECTION)?;

        self.departments = codec::parse_models(&departments)?;
        self.colleges = codec::parse_models(&colleges)?;
        self.students.replace_all(codec::parse_models(&students)?);
        self.rebuild_joins();
        info!("loaded {} students", self.students.len());
        Ok(())
    }

    /// Re-encode the student collection, rewrite its backing file whole,
    /// and rebuild the join. The department and college files are inputs
    /// only and are never written here.
    pub fn persist(&mut self) -> Result<(), StoreError> {
        let students = codec::encode_models(self.students.iter())?;
        self.storage.write_collection(Student::COLLECTION, &students)?;
        self.rebuild_joins();
        Ok(())
    }
}

/// First and last name joined for display.
pub fn full_name(student: &Student) -> String {
    format!("{} {}", student.first_name, student.last_name)
}

/// Age on the given date, or `None` when the birthday is not `YYYY-MM-DD`.
/// The year difference is reduced by one when the date falls before the
/// birthday's month and day.
pub fn age_on(student: &Student, today: NaiveDate) -> Option<i32> {
    let birthday = NaiveDate::parse_from_str(student.birthday.trim(), "%Y-%m-%d").ok()?;
    let mut age = today.year() - birthday.year();
    if (today.month(), today.day()) < (birthday.month(), birthday.day()) {
        age -= 1;
    }
    Some(age)
}

/// Age as of the current local date.
pub fn age(student: &Student) -> Option<i32> {
    age_on(student, Local::now().date_naive())
}

/// Display label for the year field: `"1"`..`"4"` map to ordinal year
/// labels, anything else is irregular.
pub fn year_level(student: &Student) -> String {
    let ordinal = match student.year.trim() {
        "1" => "1st",
        "2" => "2nd",
        "3" => "3rd",
        "4" => "4th",
        _ => return "Irregular Year".to_string(),
    };
    format!("{} Year", ordinal)
}
