#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use uuid::Uuid;

use auditlog_api::auth::jwt::{self, Claims};
use auditlog_api::auth::Authority;
use auditlog_api::config::Config;
use auditlog_api::models::{
    ActionStatus, ActionType, AuditLog, AuditLogId, CustomerId, EntityId, EntityType, PageLink,
    TenantId, TimePage, UserId,
};
use auditlog_api::query::{ActionTypeFilter, AuditLogScope};
use auditlog_api::store::{AuditLogStore, PageCursor, StoreError};

pub const JWT_SECRET: &str = "test-jwt-secret-that-is-long-enough";
pub const MAX_PAGE_SIZE: u32 = 100;

/// One call made into the store.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub tenant_id: TenantId,
    pub scope: AuditLogScope,
    pub actions: ActionTypeFilter,
    pub page_link: PageLink,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StoreMode {
    Normal,
    NoResult,
    Failing,
}

/// In-memory store that filters like the real one and records every call.
pub struct MemoryStore {
    logs: Mutex<Vec<AuditLog>>,
    calls: Mutex<Vec<RecordedCall>>,
    mode: Mutex<StoreMode>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            logs: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
            mode: Mutex::new(StoreMode::Normal),
        }
    }

    pub fn push(&self, log: AuditLog) {
        self.logs.lock().unwrap().push(log);
    }

    pub fn set_mode(&self, mode: StoreMode) {
        *self.mode.lock().unwrap() = mode;
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn in_scope(log: &AuditLog, scope: &AuditLogScope) -> bool {
        match scope {
            AuditLogScope::Tenant => true,
            AuditLogScope::Customer(c) => log.customer_id == Some(*c),
            AuditLogScope::User(u) => log.user_id == Some(*u),
            AuditLogScope::Entity(e) => log.entity_id == *e,
        }
    }
}

#[async_trait]
impl AuditLogStore for MemoryStore {
    async fn find(
        &self,
        tenant_id: TenantId,
        scope: &AuditLogScope,
        actions: &ActionTypeFilter,
        page_link: &PageLink,
    ) -> Result<Option<TimePage<AuditLog>>, StoreError> {
        self.calls.lock().unwrap().push(RecordedCall {
            tenant_id,
            scope: *scope,
            actions: actions.clone(),
            page_link: page_link.clone(),
        });

        match *self.mode.lock().unwrap() {
            StoreMode::NoResult => return Ok(None),
            StoreMode::Failing => return Err(StoreError::CorruptRow("secret detail".to_string())),
            StoreMode::Normal => {}
        }

        let mut data: Vec<AuditLog> = self
            .logs
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.tenant_id == tenant_id)
            .filter(|l| Self::in_scope(l, scope))
            .filter(|l| actions.matches(l.action_type))
            .filter(|l| page_link.start_time.is_none_or(|s| l.created_time >= s))
            .filter(|l| page_link.end_time.is_none_or(|e| l.created_time <= e))
            .cloned()
            .collect();

        data.sort_by_key(|l| (l.created_time, l.id.as_uuid()));
        if !page_link.asc_order {
            data.reverse();
        }

        let limit = page_link.limit as usize;
        let has_next = data.len() > limit;
        data.truncate(limit);
        let next_page_link = if has_next {
            data.last().map(|l| page_link.next(PageCursor::after(l).encode()))
        } else {
            None
        };

        Ok(Some(TimePage {
            data,
            has_next,
            next_page_link,
        }))
    }
}

pub fn audit_log(tenant_id: TenantId, created_time: i64, action_type: ActionType) -> AuditLog {
    AuditLog {
        id: AuditLogId::new(Uuid::now_v7()),
        created_time,
        tenant_id,
        customer_id: None,
        entity_id: EntityId::new(EntityType::Device, Uuid::now_v7()),
        entity_name: "Thermostat A".to_string(),
        user_id: None,
        user_name: "admin@example.com".to_string(),
        action_type,
        action_data: json!({}),
        action_status: ActionStatus::Success,
        action_failure_details: None,
    }
}

/// A running test server backed by a [`MemoryStore`].
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub store: Arc<MemoryStore>,
    pub tenant_id: TenantId,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn token(&self, authority: Authority) -> String {
        self.token_for(self.tenant_id, authority)
    }

    pub fn token_for(&self, tenant_id: TenantId, authority: Authority) -> String {
        let claims = Claims::new(Uuid::now_v7(), tenant_id.as_uuid(), None, authority);
        jwt::encode_token(&claims, JWT_SECRET).unwrap()
    }

    pub fn admin_token(&self) -> String {
        self.token(Authority::TenantAdmin)
    }

    /// Make an authenticated GET request.
    pub async fn get_auth(&self, path: &str, token: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn get_admin(&self, path: &str) -> (Value, StatusCode) {
        let token = self.admin_token();
        self.get_auth(path, &token).await
    }
}

pub fn test_config() -> Config {
    Config {
        database_url: "postgres://unused/unused".to_string(),
        jwt_secret: JWT_SECRET.to_string(),
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        log_level: "warn".to_string(),
        max_page_size: MAX_PAGE_SIZE,
        db_max_connections: 1,
    }
}

/// Spawn the app on a random port with an empty in-memory store.
pub async fn spawn_app() -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let app = auditlog_api::build_app(store.clone(), test_config());

    // Bind to random port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    // Spawn server in background
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    TestApp {
        addr,
        client: Client::new(),
        store,
        tenant_id: TenantId::new(Uuid::now_v7()),
    }
}

pub fn customer_id() -> CustomerId {
    CustomerId::new(Uuid::now_v7())
}

pub fn user_id() -> UserId {
    UserId::new(Uuid::now_v7())
}
