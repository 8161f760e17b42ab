//! Database-backed repository tests. Each test runs against a fresh schema
//! with the seed data applied by the migrations.

use masark_core::types::TenantId;
use masark_db::models::assessment::CreateAssessmentSession;
use masark_db::models::user::CreateUser;
use masark_db::repositories::{AssessmentRepo, CareerRepo, PersonalityTypeRepo, UserRepo};
use sqlx::PgPool;

const TENANT: TenantId = TenantId(1);

/// A tenant id with no rows. Lookups are scoped by predicate, so the tenant
/// row itself does not have to exist for reads to be exercised.
const OTHER_TENANT: TenantId = TenantId(2);

// ---------------------------------------------------------------------------
// Career matching
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn top_matches_are_sorted_best_first(pool: PgPool) {
    let intj = PersonalityTypeRepo::find_by_code(&pool, TENANT, "INTJ")
        .await
        .unwrap()
        .expect("INTJ is seeded");

    let matches = CareerRepo::top_matches(&pool, TENANT, intj.id, 5)
        .await
        .unwrap();
    assert_eq!(matches.len(), 5);

    for pair in matches.windows(2) {
        assert!(
            pair[0].match_score >= pair[1].match_score,
            "scores must be non-increasing: {} before {}",
            pair[0].match_score,
            pair[1].match_score
        );
    }

    // The seeded best-fit cluster for INTJ is Science & Research, so its two
    // careers lead with a perfect score.
    assert_eq!(matches[0].name_en, "Research Scientist");
    assert_eq!(matches[1].name_en, "Laboratory Analyst");
    assert!((matches[0].match_score - 1.0).abs() < 1e-9);
}

#[sqlx::test(migrations = "./migrations")]
async fn top_matches_respects_the_limit(pool: PgPool) {
    let intj = PersonalityTypeRepo::find_by_code(&pool, TENANT, "INTJ")
        .await
        .unwrap()
        .expect("INTJ is seeded");

    let capped = CareerRepo::top_matches(&pool, TENANT, intj.id, 3)
        .await
        .unwrap();
    assert_eq!(capped.len(), 3);

    // Asking for more than exists returns everything, once per career.
    let all = CareerRepo::top_matches(&pool, TENANT, intj.id, 500)
        .await
        .unwrap();
    assert_eq!(all.len(), 18);
}

// ---------------------------------------------------------------------------
// Tenant scoping
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn sessions_are_invisible_across_tenants(pool: PgPool) {
    let session = AssessmentRepo::create_session(
        &pool,
        TENANT,
        &CreateAssessmentSession {
            session_token: "cross-tenant-check-token".to_string(),
            student_name: None,
            student_email: None,
            student_external_id: None,
            language: "en".to_string(),
            deployment_mode: "standard".to_string(),
        },
    )
    .await
    .unwrap();

    let own = AssessmentRepo::find_by_token(&pool, TENANT, &session.session_token)
        .await
        .unwrap();
    assert!(own.is_some());

    let foreign = AssessmentRepo::find_by_token(&pool, OTHER_TENANT, &session.session_token)
        .await
        .unwrap();
    assert!(foreign.is_none(), "another tenant must not see the session");
}

#[sqlx::test(migrations = "./migrations")]
async fn users_are_invisible_across_tenants(pool: PgPool) {
    let user = UserRepo::create(
        &pool,
        TENANT,
        &CreateUser {
            username: "scoped".to_string(),
            email: "scoped@example.com".to_string(),
            password_hash: "unused".to_string(),
            role_id: 2,
        },
    )
    .await
    .unwrap();

    assert!(UserRepo::find_by_id(&pool, OTHER_TENANT, user.id)
        .await
        .unwrap()
        .is_none());
    assert!(UserRepo::find_by_username(&pool, OTHER_TENANT, "scoped")
        .await
        .unwrap()
        .is_none());
    assert!(UserRepo::find_by_id(&pool, TENANT, user.id)
        .await
        .unwrap()
        .is_some());
}
