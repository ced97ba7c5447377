use catalog_framework::mock::MockClient;
use paper_catalog::clients::CourseClient;
use paper_catalog::error::CatalogError;
use paper_catalog::model::{College, CollegeCreate, CollegeId, CourseCreate, CourseFilter};

fn college() -> College {
    College::new(
        CollegeId::new(),
        CollegeCreate {
            name: "Tech U".into(),
            code: "TU".into(),
            location: Some("North Campus".into()),
        },
    )
}

fn course(college: CollegeId, code: &str) -> CourseCreate {
    CourseCreate {
        name: "Computer Science".into(),
        code: code.into(),
        college,
        duration: 4,
    }
}

/// Real Course actor with a mocked College actor behind it.
///
/// `Course::on_create` asks the college actor whether the college exists; the client
/// then expands the stored course with one `get_many`.
#[tokio::test]
async fn course_actor_checks_its_college() {
    let tech = college();
    let mut colleges = MockClient::<College>::new();
    colleges.expect_get(tech.id).return_ok(Some(tech.clone()));
    colleges.expect_get_many().return_ok(vec![tech.clone()]);

    let (actor, generic_client) = paper_catalog::course_actor::new(8);
    let handle = tokio::spawn(actor.run(colleges.client()));
    let client = CourseClient::new(generic_client, colleges.client());

    let view = client.create(course(tech.id, "CS1")).await.unwrap();
    assert_eq!(view.code, "CS1");
    let expanded = view.college.expect("college should be expanded");
    assert_eq!(expanded.id, tech.id);
    assert_eq!(expanded.code, "TU");
    colleges.verify();

    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn missing_college_rejects_the_course() {
    let missing = CollegeId::new();
    let mut colleges = MockClient::<College>::new();
    colleges.expect_get(missing).return_ok(None);

    let (actor, generic_client) = paper_catalog::course_actor::new(8);
    let handle = tokio::spawn(actor.run(colleges.client()));
    let client = CourseClient::new(generic_client, colleges.client());

    let err = client.create(course(missing, "CS1")).await.unwrap_err();
    assert!(matches!(&err, CatalogError::NotFound(msg) if msg == "College not found"));
    colleges.verify();

    // Nothing was stored, so listing needs no college lookup.
    assert!(client.list(CourseFilter::default()).await.unwrap().is_empty());

    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn course_codes_are_unique_per_college() {
    let tech = college();
    let other = college();
    let mut colleges = MockClient::<College>::new();
    // First create, its expansion, the duplicate, then the same code elsewhere.
    colleges.expect_get(tech.id).return_ok(Some(tech.clone()));
    colleges.expect_get_many().return_ok(vec![tech.clone()]);
    colleges.expect_get(tech.id).return_ok(Some(tech.clone()));
    colleges.expect_get(other.id).return_ok(Some(other.clone()));
    colleges.expect_get_many().return_ok(vec![other.clone()]);

    let (actor, generic_client) = paper_catalog::course_actor::new(8);
    let handle = tokio::spawn(actor.run(colleges.client()));
    let client = CourseClient::new(generic_client, colleges.client());

    client.create(course(tech.id, "CS1")).await.unwrap();
    let err = client.create(course(tech.id, "CS1")).await.unwrap_err();
    assert!(
        matches!(&err, CatalogError::Conflict(msg) if msg == "Course already exists in this college")
    );
    client.create(course(other.id, "CS1")).await.unwrap();
    colleges.verify();

    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn deleted_college_expands_to_null() {
    let tech = college();
    let mut colleges = MockClient::<College>::new();
    colleges.expect_get(tech.id).return_ok(Some(tech.clone()));
    colleges.expect_get_many().return_ok(vec![tech.clone()]);
    // Later reads find the college gone.
    colleges.expect_get_many().return_ok(vec![]);

    let (actor, generic_client) = paper_catalog::course_actor::new(8);
    let handle = tokio::spawn(actor.run(colleges.client()));
    let client = CourseClient::new(generic_client, colleges.client());

    let created = client.create(course(tech.id, "CS1")).await.unwrap();
    let read = client.get(created.id).await.unwrap();
    assert!(read.college.is_none());
    colleges.verify();

    drop(client);
    handle.await.unwrap();
}
