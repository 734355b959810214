//! SQLite store for governance records.

use crate::error::StoreError;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use privgov_core::{
    ActivityDraft, Department, Incident, IncidentSeverity, IncidentStatus, Organization,
    PiaAssessment, PiaStatus, ProcessStatus, ProcessingActivity, RiskLevel,
};
use rusqlite::{Connection, OptionalExtension, Row};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

/// Fields supplied when reporting a breach incident.
#[derive(Debug, Clone)]
pub struct NewIncident {
    pub org_id: String,
    pub title: String,
    pub occurrence_date: DateTime<Utc>,
    pub severity: IncidentSeverity,
    pub impacted_individuals: Option<u32>,
    pub systems_affected: Option<String>,
    pub summary: Option<String>,
}

/// The record store. All access goes through one shared connection.
pub struct Store {
    conn: Arc<Mutex<Connection>>,
}

impl Store {
    /// Wrap an existing connection.
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// Open or create the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self::new(Arc::new(Mutex::new(conn)));
        store.init_tables()?;
        Ok(store)
    }

    /// Open an in-memory database.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let store = Self::new(Arc::new(Mutex::new(conn)));
        store.init_tables()?;
        Ok(store)
    }

    /// Create tables if missing.
    pub fn init_tables(&self) -> Result<(), StoreError> {
        let conn = self.conn.lock();

        conn.execute(
            "CREATE TABLE IF NOT EXISTS organizations (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                slug TEXT NOT NULL UNIQUE,
                address TEXT,
                city TEXT,
                country TEXT,
                phone TEXT,
                email TEXT,
                website TEXT,
                dpo_name TEXT,
                dpo_email TEXT,
                industry TEXT,
                employee_count INTEGER,
                description TEXT,
                regulator_notification_email TEXT,
                breach_notification_hours INTEGER,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS departments (
                id TEXT PRIMARY KEY,
                org_id TEXT NOT NULL,
                name TEXT NOT NULL,
                description TEXT,
                created_at TEXT NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS processes (
                id TEXT PRIMARY KEY,
                dept_id TEXT NOT NULL,
                title TEXT NOT NULL,
                description TEXT,
                data_subjects TEXT NOT NULL,
                data_categories TEXT NOT NULL,
                lawful_basis TEXT NOT NULL,
                recipients TEXT NOT NULL,
                retention_period TEXT NOT NULL,
                status TEXT NOT NULL,
                risk_level TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS incidents (
                id TEXT PRIMARY KEY,
                org_id TEXT NOT NULL,
                title TEXT NOT NULL,
                occurrence_date TEXT NOT NULL,
                severity TEXT NOT NULL,
                impacted_individuals INTEGER,
                systems_affected TEXT,
                summary TEXT,
                status TEXT NOT NULL,
                assigned_to TEXT,
                regulator_notified BOOLEAN NOT NULL DEFAULT FALSE,
                regulator_notification_date TEXT,
                resolution_notes TEXT,
                resolved_at TEXT,
                created_at TEXT NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS pia_assessments (
                id TEXT PRIMARY KEY,
                org_id TEXT NOT NULL,
                title TEXT NOT NULL,
                description TEXT,
                owner TEXT,
                status TEXT NOT NULL,
                answers TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;

        Ok(())
    }

    // --- organizations ---

    /// Insert or replace an organization record.
    pub fn upsert_organization(&self, org: &Organization) -> Result<(), StoreError> {
        let conn = self.conn.lock();
        let taken: Option<String> = conn
            .query_row(
                "SELECT id FROM organizations WHERE slug = ?1 AND id != ?2",
                rusqlite::params![&org.slug, &org.id],
                |row| row.get(0),
            )
            .optional()?;
        if taken.is_some() {
            return Err(StoreError::Conflict(format!(
                "slug already in use: {}",
                org.slug
            )));
        }

        conn.execute(
            "INSERT OR REPLACE INTO organizations
             (id, name, slug, address, city, country, phone, email, website,
              dpo_name, dpo_email, industry, employee_count, description,
              regulator_notification_email, breach_notification_hours, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)",
            rusqlite::params![
                &org.id,
                &org.name,
                &org.slug,
                &org.address,
                &org.city,
                &org.country,
                &org.phone,
                &org.email,
                &org.website,
                &org.dpo_name,
                &org.dpo_email,
                &org.industry,
                org.employee_count,
                &org.description,
                &org.regulator_notification_email,
                org.breach_notification_hours,
                org.created_at,
                org.updated_at,
            ],
        )?;
        Ok(())
    }

    /// Fetch an organization by id.
    pub fn organization(&self, id: &str) -> Result<Organization, StoreError> {
        let conn = self.conn.lock();
        conn.query_row(
            "SELECT * FROM organizations WHERE id = ?1",
            [id],
            organization_from_row,
        )
        .optional()?
        .ok_or_else(|| StoreError::not_found("organization", id))
    }

    /// Fetch an organization by slug.
    pub fn organization_by_slug(&self, slug: &str) -> Result<Organization, StoreError> {
        let conn = self.conn.lock();
        conn.query_row(
            "SELECT * FROM organizations WHERE slug = ?1",
            [slug],
            organization_from_row,
        )
        .optional()?
        .ok_or_else(|| StoreError::not_found("organization", slug))
    }

    // --- departments ---

    /// Create a department.
    pub fn create_department(
        &self,
        org_id: &str,
        name: &str,
        description: Option<&str>,
    ) -> Result<Department, StoreError> {
        let dept = Department {
            id: uuid::Uuid::new_v4().to_string(),
            org_id: org_id.to_string(),
            name: name.to_string(),
            description: description.map(String::from),
            created_at: Utc::now(),
        };
        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO departments (id, org_id, name, description, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![
                &dept.id,
                &dept.org_id,
                &dept.name,
                &dept.description,
                dept.created_at,
            ],
        )?;
        Ok(dept)
    }

    /// Insert a department with a caller-chosen id, replacing any existing row.
    pub fn upsert_department(&self, dept: &Department) -> Result<(), StoreError> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT OR REPLACE INTO departments (id, org_id, name, description, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![
                &dept.id,
                &dept.org_id,
                &dept.name,
                &dept.description,
                dept.created_at,
            ],
        )?;
        Ok(())
    }

    /// Fetch a department by id.
    pub fn department(&self, id: &str) -> Result<Department, StoreError> {
        let conn = self.conn.lock();
        conn.query_row(
            "SELECT id, org_id, name, description, created_at FROM departments WHERE id = ?1",
            [id],
            department_from_row,
        )
        .optional()?
        .ok_or_else(|| StoreError::not_found("department", id))
    }

    /// All departments of an organization, by name.
    pub fn departments(&self, org_id: &str) -> Result<Vec<Department>, StoreError> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT id, org_id, name, description, created_at FROM departments
             WHERE org_id = ?1 ORDER BY name",
        )?;
        let depts = stmt
            .query_map([org_id], department_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(depts)
    }

    /// Rename a department or change its description.
    pub fn update_department(
        &self,
        id: &str,
        name: &str,
        description: Option<&str>,
    ) -> Result<(), StoreError> {
        let conn = self.conn.lock();
        let changed = conn.execute(
            "UPDATE departments SET name = ?1, description = ?2 WHERE id = ?3",
            rusqlite::params![name, description, id],
        )?;
        if changed == 0 {
            return Err(StoreError::not_found("department", id));
        }
        Ok(())
    }

    /// Delete a department. Refused while processing activities still
    /// reference it.
    pub fn delete_department(&self, id: &str) -> Result<(), StoreError> {
        let conn = self.conn.lock();
        let in_use: i64 = conn.query_row(
            "SELECT COUNT(*) FROM processes WHERE dept_id = ?1",
            [id],
            |row| row.get(0),
        )?;
        if in_use > 0 {
            return Err(StoreError::Conflict(format!(
                "department has {in_use} processing activit{}",
                if in_use == 1 { "y" } else { "ies" }
            )));
        }
        let changed = conn.execute("DELETE FROM departments WHERE id = ?1", [id])?;
        if changed == 0 {
            return Err(StoreError::not_found("department", id));
        }
        Ok(())
    }

    // --- processing activities ---

    /// Create a processing activity in DRAFT status.
    pub fn create_process(
        &self,
        new: ActivityDraft,
        risk_level: Option<RiskLevel>,
    ) -> Result<ProcessingActivity, StoreError> {
        let now = Utc::now();
        let activity = ProcessingActivity {
            id: uuid::Uuid::new_v4().to_string(),
            dept_id: new.dept_id,
            title: new.title,
            description: new.description,
            data_subjects: new.data_subjects,
            data_categories: new.data_categories,
            lawful_basis: new.lawful_basis,
            recipients: new.recipients,
            retention_period: new.retention_period,
            status: ProcessStatus::Draft,
            risk_level,
            created_at: now,
            updated_at: now,
        };
        self.insert_process(&activity)?;
        Ok(activity)
    }

    /// Insert a fully formed activity record, replacing any existing row.
    pub fn insert_process(&self, activity: &ProcessingActivity) -> Result<(), StoreError> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT OR REPLACE INTO processes
             (id, dept_id, title, description, data_subjects, data_categories,
              lawful_basis, recipients, retention_period, status, risk_level,
              created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            rusqlite::params![
                &activity.id,
                &activity.dept_id,
                &activity.title,
                &activity.description,
                serde_json::to_string(&activity.data_subjects)?,
                serde_json::to_string(&activity.data_categories)?,
                &activity.lawful_basis,
                serde_json::to_string(&activity.recipients)?,
                &activity.retention_period,
                activity.status.to_string(),
                activity.risk_level.map(|level| level.to_string()),
                activity.created_at,
                activity.updated_at,
            ],
        )?;
        Ok(())
    }

    /// Fetch an activity by id.
    pub fn process(&self, id: &str) -> Result<ProcessingActivity, StoreError> {
        let conn = self.conn.lock();
        conn.query_row("SELECT * FROM processes WHERE id = ?1", [id], process_from_row)
            .optional()?
            .ok_or_else(|| StoreError::not_found("process", id))
    }

    /// All activities, newest first.
    pub fn processes(&self) -> Result<Vec<ProcessingActivity>, StoreError> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare("SELECT * FROM processes ORDER BY created_at DESC")?;
        let rows = stmt
            .query_map([], process_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Activities owned by one department, newest first.
    pub fn processes_by_department(
        &self,
        dept_id: &str,
    ) -> Result<Vec<ProcessingActivity>, StoreError> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare("SELECT * FROM processes WHERE dept_id = ?1 ORDER BY created_at DESC")?;
        let rows = stmt
            .query_map([dept_id], process_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Approved activities only, for the official register.
    pub fn approved_processes(&self) -> Result<Vec<ProcessingActivity>, StoreError> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT * FROM processes WHERE status = ?1 ORDER BY created_at DESC",
        )?;
        let rows = stmt
            .query_map([ProcessStatus::Approved.to_string()], process_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Replace the editable fields of an activity. The risk level is
    /// replaced wholesale alongside, never patched separately.
    pub fn update_process(
        &self,
        id: &str,
        new: ActivityDraft,
        risk_level: Option<RiskLevel>,
    ) -> Result<ProcessingActivity, StoreError> {
        let conn = self.conn.lock();
        let changed = conn.execute(
            "UPDATE processes SET
                dept_id = ?1, title = ?2, description = ?3, data_subjects = ?4,
                data_categories = ?5, lawful_basis = ?6, recipients = ?7,
                retention_period = ?8, risk_level = ?9, updated_at = ?10
             WHERE id = ?11",
            rusqlite::params![
                &new.dept_id,
                &new.title,
                &new.description,
                serde_json::to_string(&new.data_subjects)?,
                serde_json::to_string(&new.data_categories)?,
                &new.lawful_basis,
                serde_json::to_string(&new.recipients)?,
                &new.retention_period,
                risk_level.map(|level| level.to_string()),
                Utc::now(),
                id,
            ],
        )?;
        if changed == 0 {
            return Err(StoreError::not_found("process", id));
        }
        drop(conn);
        self.process(id)
    }

    /// Move an activity through the workflow.
    pub fn set_process_status(&self, id: &str, status: ProcessStatus) -> Result<(), StoreError> {
        let conn = self.conn.lock();
        let changed = conn.execute(
            "UPDATE processes SET status = ?1, updated_at = ?2 WHERE id = ?3",
            rusqlite::params![status.to_string(), Utc::now(), id],
        )?;
        if changed == 0 {
            return Err(StoreError::not_found("process", id));
        }
        Ok(())
    }

    /// Store a freshly computed risk tier.
    pub fn set_process_risk(&self, id: &str, risk_level: RiskLevel) -> Result<(), StoreError> {
        let conn = self.conn.lock();
        let changed = conn.execute(
            "UPDATE processes SET risk_level = ?1, updated_at = ?2 WHERE id = ?3",
            rusqlite::params![risk_level.to_string(), Utc::now(), id],
        )?;
        if changed == 0 {
            return Err(StoreError::not_found("process", id));
        }
        Ok(())
    }

    /// Delete an activity.
    pub fn delete_process(&self, id: &str) -> Result<(), StoreError> {
        let conn = self.conn.lock();
        let changed = conn.execute("DELETE FROM processes WHERE id = ?1", [id])?;
        if changed == 0 {
            return Err(StoreError::not_found("process", id));
        }
        Ok(())
    }

    // --- incidents ---

    /// Report a breach incident. Starts OPEN and unassigned.
    pub fn report_incident(&self, new: NewIncident) -> Result<Incident, StoreError> {
        let incident = Incident {
            id: uuid::Uuid::new_v4().to_string(),
            org_id: new.org_id,
            title: new.title,
            occurrence_date: new.occurrence_date,
            severity: new.severity,
            impacted_individuals: new.impacted_individuals,
            systems_affected: new.systems_affected,
            summary: new.summary,
            status: IncidentStatus::Open,
            assigned_to: None,
            regulator_notified: false,
            regulator_notification_date: None,
            resolution_notes: None,
            resolved_at: None,
            created_at: Utc::now(),
        };
        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO incidents
             (id, org_id, title, occurrence_date, severity, impacted_individuals,
              systems_affected, summary, status, assigned_to, regulator_notified,
              regulator_notification_date, resolution_notes, resolved_at, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
            rusqlite::params![
                &incident.id,
                &incident.org_id,
                &incident.title,
                incident.occurrence_date,
                incident.severity.to_string(),
                incident.impacted_individuals,
                &incident.systems_affected,
                &incident.summary,
                incident.status.to_string(),
                &incident.assigned_to,
                incident.regulator_notified,
                incident.regulator_notification_date,
                &incident.resolution_notes,
                incident.resolved_at,
                incident.created_at,
            ],
        )?;
        Ok(incident)
    }

    /// Fetch an incident by id.
    pub fn incident(&self, id: &str) -> Result<Incident, StoreError> {
        let conn = self.conn.lock();
        conn.query_row("SELECT * FROM incidents WHERE id = ?1", [id], incident_from_row)
            .optional()?
            .ok_or_else(|| StoreError::not_found("incident", id))
    }

    /// All incidents of an organization, newest occurrence first.
    pub fn incidents(&self, org_id: &str) -> Result<Vec<Incident>, StoreError> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT * FROM incidents WHERE org_id = ?1 ORDER BY occurrence_date DESC",
        )?;
        let rows = stmt
            .query_map([org_id], incident_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Reassign or retriage an incident.
    pub fn set_incident_status(
        &self,
        id: &str,
        status: IncidentStatus,
        assigned_to: Option<&str>,
    ) -> Result<(), StoreError> {
        let conn = self.conn.lock();
        let changed = conn.execute(
            "UPDATE incidents SET status = ?1, assigned_to = ?2 WHERE id = ?3",
            rusqlite::params![status.to_string(), assigned_to, id],
        )?;
        if changed == 0 {
            return Err(StoreError::not_found("incident", id));
        }
        Ok(())
    }

    /// Close an incident with resolution notes.
    pub fn resolve_incident(&self, id: &str, notes: &str) -> Result<(), StoreError> {
        let conn = self.conn.lock();
        let changed = conn.execute(
            "UPDATE incidents SET status = ?1, resolution_notes = ?2, resolved_at = ?3
             WHERE id = ?4",
            rusqlite::params![
                IncidentStatus::Resolved.to_string(),
                notes,
                Utc::now(),
                id
            ],
        )?;
        if changed == 0 {
            return Err(StoreError::not_found("incident", id));
        }
        Ok(())
    }

    /// Record that the regulator has been notified.
    pub fn mark_regulator_notified(
        &self,
        id: &str,
        when: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let conn = self.conn.lock();
        let changed = conn.execute(
            "UPDATE incidents SET regulator_notified = TRUE, regulator_notification_date = ?1
             WHERE id = ?2",
            rusqlite::params![when, id],
        )?;
        if changed == 0 {
            return Err(StoreError::not_found("incident", id));
        }
        Ok(())
    }

    // --- PIA assessments ---

    /// Start a PIA in DRAFT status with an empty answer set.
    pub fn create_pia(
        &self,
        org_id: &str,
        title: &str,
        description: Option<&str>,
        owner: Option<&str>,
    ) -> Result<PiaAssessment, StoreError> {
        let now = Utc::now();
        let pia = PiaAssessment {
            id: uuid::Uuid::new_v4().to_string(),
            org_id: org_id.to_string(),
            title: title.to_string(),
            description: description.map(String::from),
            owner: owner.map(String::from),
            status: PiaStatus::Draft,
            answers: BTreeMap::new(),
            created_at: now,
            updated_at: now,
        };
        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO pia_assessments
             (id, org_id, title, description, owner, status, answers, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            rusqlite::params![
                &pia.id,
                &pia.org_id,
                &pia.title,
                &pia.description,
                &pia.owner,
                pia.status.to_string(),
                serde_json::to_string(&pia.answers)?,
                pia.created_at,
                pia.updated_at,
            ],
        )?;
        Ok(pia)
    }

    /// Fetch a PIA by id.
    pub fn pia(&self, id: &str) -> Result<PiaAssessment, StoreError> {
        let conn = self.conn.lock();
        conn.query_row(
            "SELECT * FROM pia_assessments WHERE id = ?1",
            [id],
            pia_from_row,
        )
        .optional()?
        .ok_or_else(|| StoreError::not_found("pia", id))
    }

    /// All PIAs of an organization, newest first.
    pub fn pias(&self, org_id: &str) -> Result<Vec<PiaAssessment>, StoreError> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT * FROM pia_assessments WHERE org_id = ?1 ORDER BY created_at DESC",
        )?;
        let rows = stmt
            .query_map([org_id], pia_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Replace the questionnaire answers wholesale.
    pub fn update_pia_answers(
        &self,
        id: &str,
        answers: &BTreeMap<String, Value>,
    ) -> Result<(), StoreError> {
        let conn = self.conn.lock();
        let changed = conn.execute(
            "UPDATE pia_assessments SET answers = ?1, updated_at = ?2 WHERE id = ?3",
            rusqlite::params![serde_json::to_string(answers)?, Utc::now(), id],
        )?;
        if changed == 0 {
            return Err(StoreError::not_found("pia", id));
        }
        Ok(())
    }

    /// Move a PIA through the workflow.
    pub fn set_pia_status(&self, id: &str, status: PiaStatus) -> Result<(), StoreError> {
        let conn = self.conn.lock();
        let changed = conn.execute(
            "UPDATE pia_assessments SET status = ?1, updated_at = ?2 WHERE id = ?3",
            rusqlite::params![status.to_string(), Utc::now(), id],
        )?;
        if changed == 0 {
            return Err(StoreError::not_found("pia", id));
        }
        Ok(())
    }

    /// Delete a PIA.
    pub fn delete_pia(&self, id: &str) -> Result<(), StoreError> {
        let conn = self.conn.lock();
        let changed = conn.execute("DELETE FROM pia_assessments WHERE id = ?1", [id])?;
        if changed == 0 {
            return Err(StoreError::not_found("pia", id));
        }
        Ok(())
    }
}

// --- row mapping ---

fn conversion_error(
    idx: usize,
    err: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
}

fn parse_enum<T>(idx: usize, raw: String) -> rusqlite::Result<T>
where
    T: FromStr<Err = strum::ParseError>,
{
    raw.parse().map_err(|e| conversion_error(idx, e))
}

fn parse_list(idx: usize, raw: String) -> rusqlite::Result<Vec<String>> {
    serde_json::from_str(&raw).map_err(|e| conversion_error(idx, e))
}

fn organization_from_row(row: &Row<'_>) -> rusqlite::Result<Organization> {
    Ok(Organization {
        id: row.get(0)?,
        name: row.get(1)?,
        slug: row.get(2)?,
        address: row.get(3)?,
        city: row.get(4)?,
        country: row.get(5)?,
        phone: row.get(6)?,
        email: row.get(7)?,
        website: row.get(8)?,
        dpo_name: row.get(9)?,
        dpo_email: row.get(10)?,
        industry: row.get(11)?,
        employee_count: row.get(12)?,
        description: row.get(13)?,
        regulator_notification_email: row.get(14)?,
        breach_notification_hours: row.get(15)?,
        created_at: row.get(16)?,
        updated_at: row.get(17)?,
    })
}

fn department_from_row(row: &Row<'_>) -> rusqlite::Result<Department> {
    Ok(Department {
        id: row.get(0)?,
        org_id: row.get(1)?,
        name: row.get(2)?,
        description: row.get(3)?,
        created_at: row.get(4)?,
    })
}

fn process_from_row(row: &Row<'_>) -> rusqlite::Result<ProcessingActivity> {
    let risk_level = row
        .get::<_, Option<String>>(10)?
        .map(|raw| parse_enum::<RiskLevel>(10, raw))
        .transpose()?;
    Ok(ProcessingActivity {
        id: row.get(0)?,
        dept_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        data_subjects: parse_list(4, row.get(4)?)?,
        data_categories: parse_list(5, row.get(5)?)?,
        lawful_basis: row.get(6)?,
        recipients: parse_list(7, row.get(7)?)?,
        retention_period: row.get(8)?,
        status: parse_enum(9, row.get(9)?)?,
        risk_level,
        created_at: row.get(11)?,
        updated_at: row.get(12)?,
    })
}

fn incident_from_row(row: &Row<'_>) -> rusqlite::Result<Incident> {
    Ok(Incident {
        id: row.get(0)?,
        org_id: row.get(1)?,
        title: row.get(2)?,
        occurrence_date: row.get(3)?,
        severity: parse_enum(4, row.get(4)?)?,
        impacted_individuals: row.get(5)?,
        systems_affected: row.get(6)?,
        summary: row.get(7)?,
        status: parse_enum(8, row.get(8)?)?,
        assigned_to: row.get(9)?,
        regulator_notified: row.get(10)?,
        regulator_notification_date: row.get(11)?,
        resolution_notes: row.get(12)?,
        resolved_at: row.get(13)?,
        created_at: row.get(14)?,
    })
}

fn pia_from_row(row: &Row<'_>) -> rusqlite::Result<PiaAssessment> {
    let answers_raw: String = row.get(6)?;
    let answers: BTreeMap<String, Value> =
        serde_json::from_str(&answers_raw).map_err(|e| conversion_error(6, e))?;
    Ok(PiaAssessment {
        id: row.get(0)?,
        org_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        owner: row.get(4)?,
        status: parse_enum(5, row.get(5)?)?,
        answers,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_demo;

    fn payroll() -> ActivityDraft {
        ActivityDraft {
            dept_id: "dept-hr".to_string(),
            title: "Employee Payroll Processing".to_string(),
            description: Some("Monthly salary processing".to_string()),
            data_subjects: vec!["Employees".to_string(), "Dependents".to_string()],
            data_categories: vec![
                "Financial Information".to_string(),
                "Personal Information".to_string(),
            ],
            lawful_basis: "Legal Obligation".to_string(),
            recipients: vec!["Bank".to_string(), "BIR".to_string()],
            retention_period: "5 years after separation".to_string(),
        }
    }

    #[test]
    fn test_process_round_trip() {
        let store = Store::open_in_memory().unwrap();
        let created = store
            .create_process(payroll(), Some(RiskLevel::Medium))
            .unwrap();
        assert_eq!(created.status, ProcessStatus::Draft);

        let fetched = store.process(&created.id).unwrap();
        assert_eq!(fetched.title, "Employee Payroll Processing");
        assert_eq!(fetched.data_subjects, vec!["Employees", "Dependents"]);
        assert_eq!(fetched.risk_level, Some(RiskLevel::Medium));
    }

    #[test]
    fn test_missing_process_is_not_found() {
        let store = Store::open_in_memory().unwrap();
        let err = store.process("no-such-id").unwrap_err();
        assert!(matches!(err, StoreError::NotFound { kind: "process", .. }));
    }

    #[test]
    fn test_update_replaces_risk_level_wholesale() {
        let store = Store::open_in_memory().unwrap();
        let created = store
            .create_process(payroll(), Some(RiskLevel::High))
            .unwrap();

        // An update whose assessment produced no tier clears the stored one.
        store.update_process(&created.id, payroll(), None).unwrap();
        assert_eq!(store.process(&created.id).unwrap().risk_level, None);

        store
            .set_process_risk(&created.id, RiskLevel::Low)
            .unwrap();
        assert_eq!(
            store.process(&created.id).unwrap().risk_level,
            Some(RiskLevel::Low)
        );
    }

    #[test]
    fn test_approved_listing_filters_by_status() {
        let store = Store::open_in_memory().unwrap();
        let a = store.create_process(payroll(), None).unwrap();
        let _b = store.create_process(payroll(), None).unwrap();
        store
            .set_process_status(&a.id, ProcessStatus::Approved)
            .unwrap();

        let approved = store.approved_processes().unwrap();
        assert_eq!(approved.len(), 1);
        assert_eq!(approved[0].id, a.id);
    }

    #[test]
    fn test_department_delete_refused_while_referenced() {
        let store = Store::open_in_memory().unwrap();
        let org = seed_demo(&store).unwrap();
        let dept = store
            .departments(&org.id)
            .unwrap()
            .into_iter()
            .find(|d| d.name == "Human Resources")
            .unwrap();

        let err = store.delete_department(&dept.id).unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));

        // Once its processes are gone, deletion succeeds.
        for process in store.processes_by_department(&dept.id).unwrap() {
            store.delete_process(&process.id).unwrap();
        }
        store.delete_department(&dept.id).unwrap();
    }

    #[test]
    fn test_slug_uniqueness_enforced() {
        let store = Store::open_in_memory().unwrap();
        let org = seed_demo(&store).unwrap();

        let mut other = org.clone();
        other.id = "other-org".to_string();
        let err = store.upsert_organization(&other).unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[test]
    fn test_incident_lifecycle() {
        let store = Store::open_in_memory().unwrap();
        let incident = store
            .report_incident(NewIncident {
                org_id: "default-org".to_string(),
                title: "Lost laptop".to_string(),
                occurrence_date: Utc::now(),
                severity: IncidentSeverity::High,
                impacted_individuals: Some(40),
                systems_affected: Some("HR file share".to_string()),
                summary: None,
            })
            .unwrap();
        assert_eq!(incident.status, IncidentStatus::Open);
        assert!(!incident.regulator_notified);

        store
            .set_incident_status(&incident.id, IncidentStatus::InProgress, Some("Ana"))
            .unwrap();
        store
            .mark_regulator_notified(&incident.id, Utc::now())
            .unwrap();
        store
            .resolve_incident(&incident.id, "Device wiped remotely")
            .unwrap();

        let fetched = store.incident(&incident.id).unwrap();
        assert_eq!(fetched.status, IncidentStatus::Resolved);
        assert!(fetched.regulator_notified);
        assert!(fetched.resolved_at.is_some());
        assert_eq!(fetched.resolution_notes.as_deref(), Some("Device wiped remotely"));
    }

    #[test]
    fn test_data_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("privgov.db");

        let id = {
            let store = Store::open(&path).unwrap();
            store.create_process(payroll(), None).unwrap().id
        };

        let reopened = Store::open(&path).unwrap();
        assert_eq!(
            reopened.process(&id).unwrap().title,
            "Employee Payroll Processing"
        );
    }

    #[test]
    fn test_pia_answers_round_trip() {
        let store = Store::open_in_memory().unwrap();
        let pia = store
            .create_pia("default-org", "CCTV Surveillance", None, Some("Facilities"))
            .unwrap();
        assert!(pia.answers.is_empty());

        let mut answers = BTreeMap::new();
        answers.insert(
            "personal_data".to_string(),
            serde_json::json!(["Video Footage"]),
        );
        store.update_pia_answers(&pia.id, &answers).unwrap();
        store.set_pia_status(&pia.id, PiaStatus::Review).unwrap();

        let fetched = store.pia(&pia.id).unwrap();
        assert_eq!(fetched.status, PiaStatus::Review);
        assert_eq!(fetched.answer("personal_data"), "Video Footage");
    }
}
