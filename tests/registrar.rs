use registrar::{
    CollegeInput, CollegeStore, CollegeUpdate, DepartmentInput, DepartmentUpdate, EditContext,
    MemoryStorage, StoreError, Student, StudentStore, StudentUpdate,
};

fn student(id: &str, college_id: &str, department_id: &str) -> Student {
    Student {
        student_id: id.to_string(),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        gender: "Female".to_string(),
        birthday: "2000-06-15".to_string(),
        photo: "N/A".to_string(),
        college_id: college_id.to_string(),
        department_id: department_id.to_string(),
        year: "3".to_string(),
    }
}

#[test]
fn college_workflow() {
    let storage = MemoryStorage::new();
    let mut colleges = CollegeStore::new(storage.clone());
    colleges.load().unwrap();
    assert!(colleges.data().is_empty());

    // Create two colleges and a few departments the way a session would.
    let coe = colleges
        .add_college(CollegeInput {
            name: "College of Engineering".to_string(),
            abbreviation: "COE".to_string(),
        })
        .unwrap();
    let cas = colleges
        .add_college(CollegeInput {
            name: "College of Arts and Sciences".to_string(),
            abbreviation: "CAS".to_string(),
        })
        .unwrap();

    let cpe = colleges
        .add_department(
            &coe.id,
            DepartmentInput {
                name: "Computer Engineering".to_string(),
                abbreviation: "CpE".to_string(),
            },
        )
        .unwrap();
    colleges
        .add_department(
            &coe.id,
            DepartmentInput {
                name: "Civil Engineering".to_string(),
                abbreviation: "CE".to_string(),
            },
        )
        .unwrap();
    colleges
        .add_department(
            &cas.id,
            DepartmentInput {
                name: "Biology".to_string(),
                abbreviation: "BIO".to_string(),
            },
        )
        .unwrap();

    // Duplicate name and abbreviation are rejected without touching state.
    assert!(matches!(
        colleges.add_college(CollegeInput {
            name: "College of Engineering".to_string(),
            abbreviation: "XYZ".to_string(),
        }),
        Err(StoreError::DuplicateKey { .. })
    ));
    assert!(matches!(
        colleges.add_college(CollegeInput {
            name: "College of Xylophones".to_string(),
            abbreviation: "CAS".to_string(),
        }),
        Err(StoreError::DuplicateKey { .. })
    ));
    assert_eq!(colleges.data().len(), 2);

    // The joined view carries each college's departments in order.
    let coe_view = &colleges.data()[0];
    assert_eq!(coe_view.abbreviation, "COE");
    let names: Vec<&str> = coe_view
        .departments
        .iter()
        .map(|d| d.name.as_str())
        .collect();
    assert_eq!(names, vec!["Computer Engineering", "Civil Engineering"]);

    // Edit via an explicit context, as the form workflow does.
    let mut context = EditContext::new();
    let selected = context.select_college(&colleges, &coe.id).unwrap();
    assert_eq!(selected.name, "College of Engineering");
    colleges
        .update_college(
            context.college_id().unwrap(),
            CollegeUpdate {
                name: Some("College of Engineering and Architecture".to_string()),
                abbreviation: None,
            },
        )
        .unwrap();
    context.clear_college();

    context.select_college(&colleges, &coe.id).unwrap();
    context.select_department(&colleges, &cpe.id).unwrap();
    colleges
        .update_department(
            context.department_id().unwrap(),
            DepartmentUpdate {
                name: None,
                abbreviation: Some("CPE".to_string()),
            },
        )
        .unwrap();
    context.clear();

    // A fresh store over the same storage sees exactly what was persisted.
    let mut reloaded = CollegeStore::new(storage);
    reloaded.load().unwrap();
    assert_eq!(reloaded.data(), colleges.data());
    assert_eq!(
        reloaded.find_by_id(&coe.id).unwrap().name,
        "College of Engineering and Architecture"
    );
    assert_eq!(reloaded.department(&cpe.id).unwrap().abbreviation, "CPE");
}

#[test]
fn deleting_a_college_orphans_its_departments() {
    let storage = MemoryStorage::new();
    let mut colleges = CollegeStore::new(storage.clone());
    let coe = colleges
        .add_college(CollegeInput {
            name: "College of Engineering".to_string(),
            abbreviation: "COE".to_string(),
        })
        .unwrap();
    let cpe = colleges
        .add_department(
            &coe.id,
            DepartmentInput {
                name: "Computer Engineering".to_string(),
                abbreviation: "CpE".to_string(),
            },
        )
        .unwrap();

    colleges.delete_college(&coe.id).unwrap();
    assert!(colleges.data().is_empty());
    assert_eq!(colleges.department(&cpe.id).unwrap().college_id, coe.id);

    // The orphan survives a reload too.
    let mut reloaded = CollegeStore::new(storage);
    reloaded.load().unwrap();
    assert_eq!(reloaded.department(&cpe.id).unwrap().college_id, coe.id);
}

#[test]
fn student_workflow() {
    let storage = MemoryStorage::new();
    let mut colleges = CollegeStore::new(storage.clone());
    let coe = colleges
        .add_college(CollegeInput {
            name: "College of Engineering".to_string(),
            abbreviation: "COE".to_string(),
        })
        .unwrap();
    let cpe = colleges
        .add_department(
            &coe.id,
            DepartmentInput {
                name: "Computer Engineering".to_string(),
                abbreviation: "CpE".to_string(),
            },
        )
        .unwrap();

    let mut students = StudentStore::new(storage.clone());
    students.load().unwrap();

    students
        .add_student(student("2021-00123", &coe.id, &cpe.id))
        .unwrap();
    let mut second = student("2021-00456", &coe.id, &cpe.id);
    second.first_name = "Grace".to_string();
    second.last_name = "Hopper".to_string();
    students.add_student(second).unwrap();

    // Duplicate student id is rejected, collection unchanged.
    assert!(matches!(
        students.add_student(student("2021-00123", &coe.id, &cpe.id)),
        Err(StoreError::DuplicateKey { .. })
    ));
    assert_eq!(students.data().len(), 2);

    // Joins attach the department and college loaded from storage.
    let joined = &students.data()[0];
    assert_eq!(joined.department.as_ref().unwrap().abbreviation, "CpE");
    assert_eq!(joined.college.as_ref().unwrap().abbreviation, "COE");

    // Select-edit-clear, then verify the merge kept unsupplied fields.
    let mut context = EditContext::new();
    context.select_student(&students, "2021-00456").unwrap();
    let updated = students
        .update_student(
            context.student_id().unwrap(),
            StudentUpdate {
                year: Some("4".to_string()),
                photo: Some("/photos/2021-00456.png".to_string()),
                ..StudentUpdate::default()
            },
        )
        .unwrap();
    context.clear_student();
    assert_eq!(updated.year, "4");
    assert_eq!(updated.first_name, "Grace");

    // Unknown ids fail hard.
    assert!(matches!(
        students.update_student("2099-99999", StudentUpdate::default()),
        Err(StoreError::NotFound { .. })
    ));
    assert!(matches!(
        students.delete_student("2099-99999"),
        Err(StoreError::NotFound { .. })
    ));

    let removed = students.delete_student("2021-00123").unwrap();
    assert_eq!(removed.first_name, "Ada");

    // Everything observed above survives a reload.
    let mut reloaded = StudentStore::new(storage);
    reloaded.load().unwrap();
    assert_eq!(reloaded.data().len(), 1);
    let survivor = &reloaded.data()[0];
    assert_eq!(survivor.student.student_id, "2021-00456");
    assert_eq!(survivor.student.year, "4");
    assert_eq!(survivor.department.as_ref().unwrap().id, cpe.id);
}

#[test]
fn student_joins_follow_college_reload() {
    let storage = MemoryStorage::new();
    let mut colleges = CollegeStore::new(storage.clone());
    let coe = colleges
        .add_college(CollegeInput {
            name: "College of Engineering".to_string(),
            abbreviation: "COE".to_string(),
        })
        .unwrap();
    let cpe = colleges
        .add_department(
            &coe.id,
            DepartmentInput {
                name: "Computer Engineering".to_string(),
                abbreviation: "CpE".to_string(),
            },
        )
        .unwrap();

    let mut students = StudentStore::new(storage);
    students.load().unwrap();
    students
        .add_student(student("2021-00123", &coe.id, &cpe.id))
        .unwrap();
    assert!(students.data()[0].department.is_some());

    // Department deleted behind the student store's back: the join stays
    // stale until the next load, then resolves to None.
    colleges.delete_department(&cpe.id).unwrap();
    assert!(students.data()[0].department.is_some());

    students.load().unwrap();
    assert!(students.data()[0].department.is_none());
    assert!(students.data()[0].college.is_some());
}
