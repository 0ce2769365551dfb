use sqlx::SqlitePool;

#[derive(Clone)]
pub struct SqlxUserRepo {
    pub pool: SqlitePool,
}

#[derive(Clone)]
pub struct SqlxOtpRepo {
    pub pool: SqlitePool,
}

#[derive(Clone)]
pub struct SqlxCatalogRepo {
    pub pool: SqlitePool,
}

#[derive(Clone)]
pub struct SqlxEnrollmentRepo {
    pub pool: SqlitePool,
}

#[derive(Clone)]
pub struct SqlxAssignmentRepo {
    pub pool: SqlitePool,
}

#[derive(Clone)]
pub struct SqlxDiscussionRepo {
    pub pool: SqlitePool,
}

#[derive(Clone)]
pub struct SqlxUserSkillRepo {
    pub pool: SqlitePool,
}

#[derive(Clone)]
pub struct SqlxAnalyticsRepo {
    pub pool: SqlitePool,
}
