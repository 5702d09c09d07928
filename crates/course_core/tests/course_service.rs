use course_core::{
    Course, CourseDraft, CourseFilter, CourseRepository, CourseService, CourseServiceError,
    CourseStatus, CourseValidationError, KvCourseRepository, MemoryStore,
};
use std::collections::HashSet;

fn service() -> CourseService<KvCourseRepository<MemoryStore>> {
    CourseService::new(KvCourseRepository::new(MemoryStore::new()))
}

fn draft(name: &str, instructor: &str, students: u32, status: CourseStatus) -> CourseDraft {
    CourseDraft {
        name: name.to_string(),
        instructor: instructor.to_string(),
        description: None,
        student_count: students,
        status,
    }
}

#[test]
fn create_assigns_numeric_id_and_persists() {
    let service = service();
    let created = service
        .create_course(CourseDraft::new("Algorithms", "A"))
        .unwrap();

    assert!(created.id.parse::<u128>().is_ok());
    assert_eq!(created.status, CourseStatus::Open);
    assert_eq!(service.list_courses().unwrap(), vec![created.clone()]);
    assert_eq!(service.get_course(&created.id).unwrap(), Some(created));
}

#[test]
fn rapid_creates_get_distinct_ids() {
    let service = service();
    let ids: HashSet<String> = (0..20)
        .map(|index| {
            service
                .create_course(CourseDraft::new(format!("Course {index}"), "A"))
                .unwrap()
                .id
        })
        .collect();

    assert_eq!(ids.len(), 20);
}

#[test]
fn create_rejects_duplicate_name() {
    let service = service();
    service
        .create_course(CourseDraft::new("Algorithms", "A"))
        .unwrap();

    let err = service
        .create_course(CourseDraft::new("Algorithms", "B"))
        .unwrap_err();
    assert!(matches!(err, CourseServiceError::DuplicateName(name) if name == "Algorithms"));

    service
        .create_course(CourseDraft::new("algorithms", "B"))
        .unwrap();
    assert_eq!(service.list_courses().unwrap().len(), 2);
}

#[test]
fn create_validates_fields() {
    let service = service();

    let err = service
        .create_course(CourseDraft::new("x".repeat(101), "A"))
        .unwrap_err();
    assert!(matches!(
        err,
        CourseServiceError::Validation(CourseValidationError::NameTooLong { .. })
    ));

    let err = service
        .create_course(CourseDraft::new("Algorithms", " "))
        .unwrap_err();
    assert!(matches!(
        err,
        CourseServiceError::Validation(CourseValidationError::EmptyInstructor)
    ));
    assert!(service.list_courses().unwrap().is_empty());
}

#[test]
fn update_replaces_fields_and_keeps_id() {
    let service = service();
    let created = service
        .create_course(CourseDraft::new("Algorithms", "A"))
        .unwrap();

    let updated = service
        .update_course(
            &created.id,
            draft("Algorithms II", "B", 5, CourseStatus::Delayed),
        )
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(service.list_courses().unwrap(), vec![updated]);
}

#[test]
fn update_replaces_description() {
    let service = service();
    let mut initial = CourseDraft::new("Algorithms", "A");
    initial.description = Some("Graphs and DP".to_string());
    let created = service.create_course(initial).unwrap();
    assert_eq!(created.description.as_deref(), Some("Graphs and DP"));

    let updated = service
        .update_course(&created.id, CourseDraft::new("Algorithms", "A"))
        .unwrap();
    assert_eq!(updated.description, None);
    assert_eq!(service.get_course(&created.id).unwrap(), Some(updated));
}

#[test]
fn update_allows_existing_name() {
    let service = service();
    service
        .create_course(CourseDraft::new("Algorithms", "A"))
        .unwrap();
    let other = service
        .create_course(CourseDraft::new("Databases", "B"))
        .unwrap();

    service
        .update_course(&other.id, CourseDraft::new("Algorithms", "B"))
        .unwrap();
}

#[test]
fn update_unknown_id_is_not_found() {
    let service = service();
    let err = service
        .update_course("404", CourseDraft::new("Algorithms", "A"))
        .unwrap_err();
    assert!(matches!(err, CourseServiceError::NotFound(id) if id == "404"));
    assert!(service.list_courses().unwrap().is_empty());
}

#[test]
fn delete_refuses_courses_with_students() {
    let service = service();
    let created = service
        .create_course(draft("Algorithms", "A", 5, CourseStatus::Open))
        .unwrap();

    assert!(!service.can_delete(&created.id).unwrap());
    let err = service.delete_course(&created.id).unwrap_err();
    assert!(matches!(
        err,
        CourseServiceError::HasEnrolledStudents { student_count: 5, .. }
    ));
    assert_eq!(service.list_courses().unwrap().len(), 1);
}

#[test]
fn delete_removes_empty_course() {
    let service = service();
    let created = service
        .create_course(CourseDraft::new("Algorithms", "A"))
        .unwrap();

    service.delete_course(&created.id).unwrap();
    assert!(service.list_courses().unwrap().is_empty());
    assert!(service.repository().get(&created.id).unwrap().is_none());
}

#[test]
fn delete_unknown_id_is_not_found() {
    let service = service();
    let err = service.delete_course("missing").unwrap_err();
    assert!(matches!(err, CourseServiceError::NotFound(_)));
}

fn seeded() -> CourseService<KvCourseRepository<MemoryStore>> {
    let service = service();
    for item in [
        draft("Intro to Algorithms", "Alice", 10, CourseStatus::Open),
        draft("Databases", "Bob", 0, CourseStatus::Closed),
        draft("Advanced Algorithms", "Bob", 3, CourseStatus::Open),
        draft("Compilers", "Alice", 0, CourseStatus::Delayed),
    ] {
        service.create_course(item).unwrap();
    }
    service
}

fn names(courses: &[Course]) -> Vec<&str> {
    courses.iter().map(|course| course.name.as_str()).collect()
}

#[test]
fn search_combines_filters_and_keeps_order() {
    let service = seeded();

    let by_name = service
        .search(&CourseFilter {
            name_query: Some("algorithms".to_string()),
            ..CourseFilter::default()
        })
        .unwrap();
    assert_eq!(names(&by_name), ["Intro to Algorithms", "Advanced Algorithms"]);

    let combined = service
        .search(&CourseFilter {
            name_query: Some("ALGO".to_string()),
            instructor: Some("Bob".to_string()),
            status: Some(CourseStatus::Open),
        })
        .unwrap();
    assert_eq!(names(&combined), ["Advanced Algorithms"]);

    let none = service
        .search(&CourseFilter {
            instructor: Some("Alice".to_string()),
            status: Some(CourseStatus::Closed),
            ..CourseFilter::default()
        })
        .unwrap();
    assert!(none.is_empty());
}

#[test]
fn empty_filter_returns_everything() {
    let service = seeded();
    assert_eq!(service.search(&CourseFilter::default()).unwrap().len(), 4);
}

#[test]
fn instructors_are_distinct_in_first_seen_order() {
    let service = seeded();
    assert_eq!(service.instructors().unwrap(), ["Alice", "Bob"]);
}
