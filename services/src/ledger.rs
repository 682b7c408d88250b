//! The attendance ledger: authoritative per-member, per-date status store.
//!
//! The storage seam is a trait so the check-in validator runs unchanged
//! against the SQLite-backed ledger in production and the in-memory ledger
//! in tests or embedded callers.

use chrono::{DateTime, NaiveDate, Utc};
use db::models::{attendance_record, member};
use sea_orm::sea_query::{Expr, Func, OnConflict};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter,
    QuerySelect, Set,
};
use std::collections::HashMap;
use std::future::Future;
use std::sync::RwLock;
use thiserror::Error;

pub use db::models::attendance_record::{AttendanceStatus, CheckInMode};

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("database error: {0}")]
    Db(#[from] sea_orm::DbErr),
}

/// Per-date roll-up. `total` counts every roster member whether or not a
/// record exists for the date, so `present + absent + late <= total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct AttendanceStats {
    pub present: u64,
    pub absent: u64,
    pub late: u64,
    pub total: u64,
}

pub trait AttendanceLedger: Send + Sync {
    /// Upserts the `(member_id, date)` record in one atomic step; readers
    /// never observe a duplicate or a missing row mid-write.
    fn set_status(
        &self,
        member_id: i64,
        date: NaiveDate,
        status: AttendanceStatus,
        checked_in_at: Option<DateTime<Utc>>,
        mode: CheckInMode,
    ) -> impl Future<Output = Result<(), LedgerError>> + Send;

    fn get_status(
        &self,
        member_id: i64,
        date: NaiveDate,
    ) -> impl Future<Output = Result<Option<AttendanceStatus>, LedgerError>> + Send;

    fn member_exists(&self, member_id: i64)
    -> impl Future<Output = Result<bool, LedgerError>> + Send;

    /// Removes the member and all of their records. Returns `false` when
    /// the member was not on the roster.
    fn remove_member(&self, member_id: i64)
    -> impl Future<Output = Result<bool, LedgerError>> + Send;

    fn stats_for_date(
        &self,
        date: NaiveDate,
    ) -> impl Future<Output = Result<AttendanceStats, LedgerError>> + Send;
}

/// Production ledger backed by the `attendance_records` and `members`
/// tables.
#[derive(Debug, Clone)]
pub struct DbLedger {
    db: DatabaseConnection,
}

impl DbLedger {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl AttendanceLedger for DbLedger {
    async fn set_status(
        &self,
        member_id: i64,
        date: NaiveDate,
        status: AttendanceStatus,
        checked_in_at: Option<DateTime<Utc>>,
        mode: CheckInMode,
    ) -> Result<(), LedgerError> {
        attendance_record::Entity::insert(attendance_record::ActiveModel {
            member_id: Set(member_id),
            date: Set(date),
            status: Set(status),
            checked_in_at: Set(checked_in_at),
            mode: Set(mode),
        })
        .on_conflict(
            OnConflict::columns([
                attendance_record::Column::MemberId,
                attendance_record::Column::Date,
            ])
            .update_columns([
                attendance_record::Column::Status,
                attendance_record::Column::CheckedInAt,
                attendance_record::Column::Mode,
            ])
            .to_owned(),
        )
        .exec_without_returning(&self.db)
        .await?;
        Ok(())
    }

    async fn get_status(
        &self,
        member_id: i64,
        date: NaiveDate,
    ) -> Result<Option<AttendanceStatus>, LedgerError> {
        let record = attendance_record::Entity::find_by_id((member_id, date))
            .one(&self.db)
            .await?;
        Ok(record.map(|r| r.status))
    }

    async fn member_exists(&self, member_id: i64) -> Result<bool, LedgerError> {
        Ok(member::Model::exists(&self.db, member_id).await?)
    }

    async fn remove_member(&self, member_id: i64) -> Result<bool, LedgerError> {
        Ok(member::Model::delete_cascade(&self.db, member_id).await?)
    }

    async fn stats_for_date(&self, date: NaiveDate) -> Result<AttendanceStats, LedgerError> {
        #[derive(FromQueryResult)]
        struct StatusCount {
            status: AttendanceStatus,
            cnt: i64,
        }

        let rows: Vec<StatusCount> = attendance_record::Entity::find()
            .select_only()
            .column(attendance_record::Column::Status)
            .column_as(
                Expr::expr(Func::count(Expr::col(attendance_record::Column::MemberId))),
                "cnt",
            )
            .filter(attendance_record::Column::Date.eq(date))
            .group_by(attendance_record::Column::Status)
            .into_model::<StatusCount>()
            .all(&self.db)
            .await?;

        let mut stats = AttendanceStats {
            total: member::Entity::find().count(&self.db).await?,
            ..Default::default()
        };
        for row in rows {
            let cnt = row.cnt as u64;
            match row.status {
                AttendanceStatus::Present => stats.present = cnt,
                AttendanceStatus::Absent => stats.absent = cnt,
                AttendanceStatus::Late => stats.late = cnt,
            }
        }
        Ok(stats)
    }
}

#[derive(Debug, Clone, Copy)]
struct MemoryRecord {
    status: AttendanceStatus,
}

#[derive(Debug, Default)]
struct MemoryState {
    roster: Vec<i64>,
    records: HashMap<(i64, NaiveDate), MemoryRecord>,
}

/// In-memory ledger for tests and embedded use. Mirrors the contract of
/// [`DbLedger`], including the roster-wide `total` in stats.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    inner: RwLock<MemoryState>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_member(&self, member_id: i64) {
        let mut state = self.inner.write().expect("ledger lock poisoned");
        if !state.roster.contains(&member_id) {
            state.roster.push(member_id);
        }
    }
}

impl AttendanceLedger for MemoryLedger {
    async fn set_status(
        &self,
        member_id: i64,
        date: NaiveDate,
        status: AttendanceStatus,
        _checked_in_at: Option<DateTime<Utc>>,
        _mode: CheckInMode,
    ) -> Result<(), LedgerError> {
        let mut state = self.inner.write().expect("ledger lock poisoned");
        state
            .records
            .insert((member_id, date), MemoryRecord { status });
        Ok(())
    }

    async fn get_status(
        &self,
        member_id: i64,
        date: NaiveDate,
    ) -> Result<Option<AttendanceStatus>, LedgerError> {
        let state = self.inner.read().expect("ledger lock poisoned");
        Ok(state.records.get(&(member_id, date)).map(|r| r.status))
    }

    async fn member_exists(&self, member_id: i64) -> Result<bool, LedgerError> {
        let state = self.inner.read().expect("ledger lock poisoned");
        Ok(state.roster.contains(&member_id))
    }

    async fn remove_member(&self, member_id: i64) -> Result<bool, LedgerError> {
        let mut state = self.inner.write().expect("ledger lock poisoned");
        let found = state.roster.contains(&member_id);
        state.roster.retain(|id| *id != member_id);
        state.records.retain(|(id, _), _| *id != member_id);
        Ok(found)
    }

    async fn stats_for_date(&self, date: NaiveDate) -> Result<AttendanceStats, LedgerError> {
        let state = self.inner.read().expect("ledger lock poisoned");
        let mut stats = AttendanceStats {
            total: state.roster.len() as u64,
            ..Default::default()
        };
        for ((_, d), record) in state.records.iter() {
            if *d != date {
                continue;
            }
            match record.status {
                AttendanceStatus::Present => stats.present += 1,
                AttendanceStatus::Absent => stats.absent += 1,
                AttendanceStatus::Late => stats.late += 1,
            }
        }
        Ok(stats)
    }
}
