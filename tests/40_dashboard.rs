mod common;

use axum::http::StatusCode;
use common::{TestApp, NORTH, SOUTH};
use serde_json::json;

#[tokio::test]
async fn counts_reflect_only_the_callers_tenant() {
    let app = TestApp::new();
    let teacher = app.create_teacher(NORTH, "Ana", "Lee", "Math").await;
    let algebra = app.create_course(NORTH, "Algebra I", &teacher["id"]).await;
    let geometry = app.create_course(NORTH, "Geometry", &teacher["id"]).await;

    let mut students = Vec::new();
    for name in ["Sam", "Kai", "Mo"] {
        students.push(app.create_student(NORTH, name, "Doe", 9).await);
    }
    for (student, course) in [
        (&students[0], &algebra),
        (&students[1], &algebra),
        (&students[2], &algebra),
        (&students[0], &geometry),
    ] {
        app.create_enrollment(NORTH, &student["id"], &course["id"], "2024-09-02").await;
    }

    let (status, body) = app.get(NORTH, "/api/dashboard").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"],
        json!({
            "schoolName": "Northside",
            "totalStudents": 3,
            "totalCourses": 2,
            "totalTeachers": 1,
            "totalSubjects": 1,
            "totalEnrollments": 4
        })
    );

    let (status, body) = app.get(SOUTH, "/api/dashboard").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"],
        json!({
            "schoolName": "Riverside",
            "totalStudents": 0,
            "totalCourses": 0,
            "totalTeachers": 0,
            "totalSubjects": 0,
            "totalEnrollments": 0
        })
    );
}

#[tokio::test]
async fn subjects_are_counted_once() {
    let app = TestApp::new();
    app.create_teacher(NORTH, "Ana", "Lee", "Math").await;
    app.create_teacher(NORTH, "Bo", "Kim", "Math").await;
    app.create_teacher(NORTH, "Cy", "Ng", "History").await;

    let (_, body) = app.get(NORTH, "/api/dashboard").await;
    assert_eq!(body["data"]["totalTeachers"], 3);
    assert_eq!(body["data"]["totalSubjects"], 2);
}

#[tokio::test]
async fn counts_drop_after_deletes() {
    let app = TestApp::new();
    let teacher = app.create_teacher(NORTH, "Ana", "Lee", "Math").await;
    app.delete(NORTH, &format!("/api/teachers/{}", teacher["id"])).await;

    let (_, body) = app.get(NORTH, "/api/dashboard").await;
    assert_eq!(body["data"]["totalTeachers"], 0);
    assert_eq!(body["data"]["totalSubjects"], 0);
}
