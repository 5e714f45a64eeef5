//! Service-layer tests over in-memory fakes.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use atelier_core::models::{
    Blog, BlogDraft, BlogPatch, Broadcast, Contract, ContractDraft, ContractStatus, Profile,
    ProfilePatch, ResourceType, NewUpload, Subscriber,
};
use atelier_core::pagination::PageRequest;
use atelier_core::repository::{
    BroadcastRepository, ContentRepository, ContractRepository, ProfileRepository,
    StatsRepository, SubscriberRepository,
};
use atelier_core::{AppError, AppResult, MailError, Predicate, SortOrder};
use atelier_services::{
    AdminService, BroadcastService, ContentService, ContractService, ListQuery, Mailer,
    OutboundEmail, ProfileService,
};
use atelier_storage::{MediaStore, StorageError, StorageResult, StoredObject};
use bytes::Bytes;
use chrono::Utc;
use uuid::Uuid;

// ---- fakes ----------------------------------------------------------------

#[derive(Default)]
struct FakeBlogRepo {
    rows: Mutex<HashMap<Uuid, Blog>>,
    fail_save: AtomicBool,
}

impl FakeBlogRepo {
    fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    fn get(&self, id: Uuid) -> Option<Blog> {
        self.rows.lock().unwrap().get(&id).cloned()
    }
}

#[async_trait]
impl ContentRepository<Blog> for FakeBlogRepo {
    async fn insert(&self, draft: &BlogDraft) -> AppResult<Blog> {
        let blog = Blog {
            id: Uuid::new_v4(),
            title: draft.title.clone(),
            read_time: draft.read_time.clone(),
            description: draft.description.clone(),
            featured: draft.featured,
            status: draft.status,
            media: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.rows.lock().unwrap().insert(blog.id, blog.clone());
        Ok(blog)
    }

    async fn fetch(&self, id: Uuid) -> AppResult<Option<Blog>> {
        Ok(self.get(id))
    }

    async fn save(&self, entity: &Blog) -> AppResult<Blog> {
        if self.fail_save.load(Ordering::SeqCst) {
            return Err(AppError::Internal("save failed".to_string()));
        }
        self.rows.lock().unwrap().insert(entity.id, entity.clone());
        Ok(entity.clone())
    }

    async fn remove(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.rows.lock().unwrap().remove(&id).is_some())
    }

    async fn search(
        &self,
        _predicate: &Predicate,
        _sort: SortOrder,
        offset: u64,
        limit: u32,
    ) -> AppResult<Vec<Blog>> {
        let mut rows: Vec<Blog> = self.rows.lock().unwrap().values().cloned().collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count(&self, _predicate: &Predicate) -> AppResult<u64> {
        Ok(self.len() as u64)
    }
}

#[derive(Default)]
struct FakeStore {
    fail_uploads: AtomicBool,
    fail_deletes: AtomicBool,
    upload_seq: AtomicUsize,
    deleted: Mutex<Vec<String>>,
}

#[async_trait]
impl MediaStore for FakeStore {
    async fn upload(
        &self,
        folder: &str,
        _original_filename: &str,
        _content_type: &str,
        _data: Bytes,
    ) -> StorageResult<StoredObject> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(StorageError::UploadFailed("provider down".to_string()));
        }
        let n = self.upload_seq.fetch_add(1, Ordering::SeqCst);
        Ok(StoredObject {
            provider_id: format!("{folder}/obj-{n}"),
            url: format!("https://cdn.test/{folder}/obj-{n}"),
        })
    }

    async fn delete(&self, provider_id: &str, _resource_type: ResourceType) -> StorageResult<()> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(StorageError::DeleteFailed("provider down".to_string()));
        }
        self.deleted.lock().unwrap().push(provider_id.to_string());
        Ok(())
    }
}

#[derive(Default)]
struct RecordingMailer {
    sent: Mutex<Vec<OutboundEmail>>,
    // recipients containing this substring are refused
    fail_matching: Mutex<Option<String>>,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        email.validate()?;
        if let Some(pattern) = self.fail_matching.lock().unwrap().as_deref() {
            if email.to.contains(pattern) {
                return Err(MailError::Send("relay refused".to_string()));
            }
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

#[derive(Default)]
struct FakeContractRepo {
    rows: Mutex<HashMap<Uuid, Contract>>,
}

#[async_trait]
impl ContractRepository for FakeContractRepo {
    async fn insert(&self, draft: &ContractDraft) -> AppResult<Contract> {
        let contract = Contract {
            id: Uuid::new_v4(),
            full_name: draft.full_name.clone(),
            email: draft.email.clone(),
            phone_number: draft.phone_number.clone(),
            occupation: draft.occupation.clone(),
            message: draft.message.clone(),
            status: ContractStatus::New,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.rows.lock().unwrap().insert(contract.id, contract.clone());
        Ok(contract)
    }

    async fn fetch(&self, id: Uuid) -> AppResult<Option<Contract>> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn save(&self, contract: &Contract) -> AppResult<Contract> {
        self.rows
            .lock()
            .unwrap()
            .insert(contract.id, contract.clone());
        Ok(contract.clone())
    }

    async fn remove(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.rows.lock().unwrap().remove(&id).is_some())
    }

    async fn search(
        &self,
        _predicate: &Predicate,
        _sort: SortOrder,
        offset: u64,
        limit: u32,
    ) -> AppResult<Vec<Contract>> {
        let rows: Vec<Contract> = self.rows.lock().unwrap().values().cloned().collect();
        Ok(rows
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count(&self, _predicate: &Predicate) -> AppResult<u64> {
        Ok(self.rows.lock().unwrap().len() as u64)
    }
}

#[derive(Default)]
struct FakeSubscriberRepo {
    rows: Mutex<Vec<Subscriber>>,
}

#[async_trait]
impl SubscriberRepository for FakeSubscriberRepo {
    async fn insert(&self, email: &str) -> AppResult<Subscriber> {
        let subscriber = Subscriber {
            id: Uuid::new_v4(),
            email: email.to_string(),
            created_at: Utc::now(),
        };
        self.rows.lock().unwrap().push(subscriber.clone());
        Ok(subscriber)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Subscriber>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn fetch(&self, id: Uuid) -> AppResult<Option<Subscriber>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned())
    }

    async fn all(&self) -> AppResult<Vec<Subscriber>> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn remove(&self, id: Uuid) -> AppResult<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|s| s.id != id);
        Ok(rows.len() < before)
    }

    async fn search(
        &self,
        _predicate: &Predicate,
        _sort: SortOrder,
        offset: u64,
        limit: u32,
    ) -> AppResult<Vec<Subscriber>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn count(&self, _predicate: &Predicate) -> AppResult<u64> {
        Ok(self.rows.lock().unwrap().len() as u64)
    }
}

#[derive(Default)]
struct FakeBroadcastRepo {
    rows: Mutex<Vec<Broadcast>>,
}

#[async_trait]
impl BroadcastRepository for FakeBroadcastRepo {
    async fn insert(&self, email: &str, subject: &str, html: &str) -> AppResult<Broadcast> {
        let broadcast = Broadcast {
            id: Uuid::new_v4(),
            email: email.to_string(),
            subject: subject.to_string(),
            html: html.to_string(),
            created_at: Utc::now(),
        };
        self.rows.lock().unwrap().push(broadcast.clone());
        Ok(broadcast)
    }

    async fn fetch(&self, id: Uuid) -> AppResult<Option<Broadcast>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.id == id)
            .cloned())
    }

    async fn remove(&self, id: Uuid) -> AppResult<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|b| b.id != id);
        Ok(rows.len() < before)
    }

    async fn search(
        &self,
        _predicate: &Predicate,
        _sort: SortOrder,
        offset: u64,
        limit: u32,
    ) -> AppResult<Vec<Broadcast>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn count(&self, _predicate: &Predicate) -> AppResult<u64> {
        Ok(self.rows.lock().unwrap().len() as u64)
    }
}

#[derive(Default)]
struct FakeProfileRepo {
    rows: Mutex<HashMap<Uuid, Profile>>,
}

#[async_trait]
impl ProfileRepository for FakeProfileRepo {
    async fn fetch_by_user(&self, user_id: Uuid) -> AppResult<Option<Profile>> {
        Ok(self.rows.lock().unwrap().get(&user_id).cloned())
    }

    async fn create(&self, user_id: Uuid) -> AppResult<Profile> {
        let profile = Profile {
            id: Uuid::new_v4(),
            user_id,
            full_name: String::new(),
            user_name: String::new(),
            email: String::new(),
            phone_number: String::new(),
            bio: String::new(),
            media: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.rows.lock().unwrap().insert(user_id, profile.clone());
        Ok(profile)
    }

    async fn save(&self, profile: &Profile) -> AppResult<Profile> {
        self.rows
            .lock()
            .unwrap()
            .insert(profile.user_id, profile.clone());
        Ok(profile.clone())
    }
}

struct FakeStatsRepo {
    rows: Vec<(u32, i64)>,
}

#[async_trait]
impl StatsRepository for FakeStatsRepo {
    async fn monthly_signups(&self, _year: i32) -> AppResult<Vec<(u32, i64)>> {
        Ok(self.rows.clone())
    }
}

// ---- helpers --------------------------------------------------------------

fn blog_draft(title: &str) -> BlogDraft {
    BlogDraft {
        title: title.to_string(),
        read_time: "5 min".to_string(),
        description: "A long enough description for the bounds.".to_string(),
        ..Default::default()
    }
}

fn png_upload() -> NewUpload {
    NewUpload {
        bytes: Bytes::from_static(b"not really a png"),
        original_filename: "cover.png".to_string(),
        content_type: "image/png".to_string(),
    }
}

fn blog_service(
    repo: &Arc<FakeBlogRepo>,
    store: &Arc<FakeStore>,
) -> ContentService<Blog> {
    ContentService::new(repo.clone(), store.clone(), 10)
}

fn contract_draft(email: &str) -> ContractDraft {
    ContractDraft {
        full_name: "Ada Lovelace".to_string(),
        email: email.to_string(),
        message: "Hello there".to_string(),
        ..Default::default()
    }
}

// ---- content lifecycle ----------------------------------------------------

#[tokio::test]
async fn create_without_file_keeps_record_without_media() {
    let repo = Arc::new(FakeBlogRepo::default());
    let store = Arc::new(FakeStore::default());
    let service = blog_service(&repo, &store);

    let blog = service.create(blog_draft("First post"), None).await.unwrap();
    assert!(blog.media.is_none());
    assert_eq!(repo.len(), 1);
}

#[tokio::test]
async fn create_attaches_uploaded_media() {
    let repo = Arc::new(FakeBlogRepo::default());
    let store = Arc::new(FakeStore::default());
    let service = blog_service(&repo, &store);

    let blog = service
        .create(blog_draft("With cover"), Some(png_upload()))
        .await
        .unwrap();

    let media = blog.media.expect("media attached");
    assert!(media.provider_id.starts_with("blog-images/"));
    assert_eq!(media.content_type, "image/png");
    assert_eq!(repo.get(blog.id).unwrap().media, Some(media));
}

#[tokio::test]
async fn create_rolls_back_record_when_upload_fails() {
    let repo = Arc::new(FakeBlogRepo::default());
    let store = Arc::new(FakeStore::default());
    store.fail_uploads.store(true, Ordering::SeqCst);
    let service = blog_service(&repo, &store);

    let err = service
        .create(blog_draft("Doomed"), Some(png_upload()))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Upload(_)));
    assert_eq!(repo.len(), 0, "orphan record must be removed");
}

#[tokio::test]
async fn create_rolls_back_when_media_save_fails() {
    let repo = Arc::new(FakeBlogRepo::default());
    let store = Arc::new(FakeStore::default());
    repo.fail_save.store(true, Ordering::SeqCst);
    let service = blog_service(&repo, &store);

    let err = service
        .create(blog_draft("Doomed too"), Some(png_upload()))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Internal(_)));
    assert_eq!(repo.len(), 0);
}

#[tokio::test]
async fn update_without_file_preserves_media() {
    let repo = Arc::new(FakeBlogRepo::default());
    let store = Arc::new(FakeStore::default());
    let service = blog_service(&repo, &store);

    let blog = service
        .create(blog_draft("Original"), Some(png_upload()))
        .await
        .unwrap();
    let media_before = blog.media.clone().unwrap();

    let patch = BlogPatch {
        title: Some("Renamed".to_string()),
        ..Default::default()
    };
    let updated = service
        .update(&blog.id.to_string(), patch, None)
        .await
        .unwrap();

    assert_eq!(updated.title, "Renamed");
    assert_eq!(updated.media, Some(media_before));
    assert!(store.deleted.lock().unwrap().is_empty());
}

#[tokio::test]
async fn update_with_file_replaces_and_deletes_old_object() {
    let repo = Arc::new(FakeBlogRepo::default());
    let store = Arc::new(FakeStore::default());
    let service = blog_service(&repo, &store);

    let blog = service
        .create(blog_draft("Original"), Some(png_upload()))
        .await
        .unwrap();
    let old_id = blog.media.clone().unwrap().provider_id;

    let updated = service
        .update(&blog.id.to_string(), BlogPatch::default(), Some(png_upload()))
        .await
        .unwrap();

    let new_media = updated.media.unwrap();
    assert_ne!(new_media.provider_id, old_id);
    assert_eq!(store.deleted.lock().unwrap().as_slice(), [old_id]);
}

#[tokio::test]
async fn patch_cannot_blank_a_required_field() {
    let repo = Arc::new(FakeBlogRepo::default());
    let store = Arc::new(FakeStore::default());
    let service = blog_service(&repo, &store);

    let blog = service.create(blog_draft("Keep me"), None).await.unwrap();
    let patch = BlogPatch {
        title: Some(String::new()),
        ..Default::default()
    };
    let err = service
        .update(&blog.id.to_string(), patch, None)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(repo.get(blog.id).unwrap().title, "Keep me");
}

#[tokio::test]
async fn delete_removes_record_even_when_provider_delete_fails() {
    let repo = Arc::new(FakeBlogRepo::default());
    let store = Arc::new(FakeStore::default());
    let service = blog_service(&repo, &store);

    let blog = service
        .create(blog_draft("Short lived"), Some(png_upload()))
        .await
        .unwrap();
    store.fail_deletes.store(true, Ordering::SeqCst);

    service.delete(&blog.id.to_string()).await.unwrap();
    assert_eq!(repo.len(), 0);
}

#[tokio::test]
async fn malformed_id_is_rejected_before_any_lookup() {
    let repo = Arc::new(FakeBlogRepo::default());
    let store = Arc::new(FakeStore::default());
    let service = blog_service(&repo, &store);

    assert!(matches!(
        service.get("not-a-uuid").await.unwrap_err(),
        AppError::InvalidId(_)
    ));
    assert!(matches!(
        service.delete("123").await.unwrap_err(),
        AppError::InvalidId(_)
    ));
}

#[tokio::test]
async fn list_paginates_with_metadata() {
    let repo = Arc::new(FakeBlogRepo::default());
    let store = Arc::new(FakeStore::default());
    let service = blog_service(&repo, &store);

    for i in 0..25 {
        service
            .create(blog_draft(&format!("Post number {i}")), None)
            .await
            .unwrap();
    }

    let query = ListQuery {
        page: PageRequest {
            page: Some(2),
            limit: Some(10),
        },
        ..Default::default()
    };
    let page = service.list(query).await.unwrap();

    assert_eq!(page.items.len(), 10);
    assert_eq!(page.pagination.total, 25);
    assert_eq!(page.pagination.total_pages, 3);
    assert!(page.pagination.has_next);
    assert!(page.pagination.has_prev);
}

// ---- contracts ------------------------------------------------------------

#[tokio::test]
async fn respond_emails_submitter_and_flips_status() {
    let repo = Arc::new(FakeContractRepo::default());
    let mailer = Arc::new(RecordingMailer::default());
    let service = ContractService::new(repo.clone(), mailer.clone(), 10);

    let contract = service
        .create(contract_draft("ada@example.com"))
        .await
        .unwrap();
    assert_eq!(contract.status, ContractStatus::New);

    let responded = service
        .respond(&contract.id.to_string(), "Thanks, talk soon")
        .await
        .unwrap();

    assert_eq!(responded.status, ContractStatus::Responded);
    let sent = mailer.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "ada@example.com");
    assert!(sent[0].html.contains("Thanks, talk soon"));
}

#[tokio::test]
async fn respond_requires_a_message() {
    let repo = Arc::new(FakeContractRepo::default());
    let mailer = Arc::new(RecordingMailer::default());
    let service = ContractService::new(repo.clone(), mailer.clone(), 10);

    let contract = service
        .create(contract_draft("ada@example.com"))
        .await
        .unwrap();
    let err = service
        .respond(&contract.id.to_string(), "   ")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AppError::Mail(MailError::MissingField("message"))
    ));
    assert!(mailer.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn respond_keeps_status_when_send_fails() {
    let repo = Arc::new(FakeContractRepo::default());
    let mailer = Arc::new(RecordingMailer::default());
    *mailer.fail_matching.lock().unwrap() = Some("ada".to_string());
    let service = ContractService::new(repo.clone(), mailer.clone(), 10);

    let contract = service
        .create(contract_draft("ada@example.com"))
        .await
        .unwrap();
    let err = service
        .respond(&contract.id.to_string(), "Hello")
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Mail(MailError::Send(_))));
    let stored = repo.rows.lock().unwrap().get(&contract.id).cloned().unwrap();
    assert_eq!(stored.status, ContractStatus::New);
}

#[tokio::test]
async fn contract_draft_is_validated() {
    let repo = Arc::new(FakeContractRepo::default());
    let mailer = Arc::new(RecordingMailer::default());
    let service = ContractService::new(repo.clone(), mailer, 10);

    let err = service
        .create(contract_draft("not-an-email"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(repo.rows.lock().unwrap().len(), 0);
}

// ---- broadcast ------------------------------------------------------------

fn broadcast_service(
    subscribers: &Arc<FakeSubscriberRepo>,
    broadcasts: &Arc<FakeBroadcastRepo>,
    mailer: &Arc<RecordingMailer>,
) -> BroadcastService {
    BroadcastService::new(
        subscribers.clone(),
        broadcasts.clone(),
        mailer.clone(),
        4,
        10,
    )
}

#[tokio::test]
async fn duplicate_subscription_is_rejected() {
    let subscribers = Arc::new(FakeSubscriberRepo::default());
    let broadcasts = Arc::new(FakeBroadcastRepo::default());
    let mailer = Arc::new(RecordingMailer::default());
    let service = broadcast_service(&subscribers, &broadcasts, &mailer);

    service.subscribe("one@example.com").await.unwrap();
    let err = service.subscribe("one@example.com").await.unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(subscribers.rows.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn send_to_all_isolates_per_recipient_failures() {
    let subscribers = Arc::new(FakeSubscriberRepo::default());
    let broadcasts = Arc::new(FakeBroadcastRepo::default());
    let mailer = Arc::new(RecordingMailer::default());
    *mailer.fail_matching.lock().unwrap() = Some("bad".to_string());
    let service = broadcast_service(&subscribers, &broadcasts, &mailer);

    for email in [
        "a@example.com",
        "b@example.com",
        "bad@example.com",
        "c@example.com",
        "d@example.com",
    ] {
        service.subscribe(email).await.unwrap();
    }

    let report = service
        .send_to_all("News", "<p>Hello all</p>")
        .await
        .unwrap();

    assert_eq!(report.total, 5);
    assert_eq!(report.sent, 4);
    assert_eq!(report.failed, 1);
    assert_eq!(report.errors[0].email, "bad@example.com");
    // Only successful sends are logged.
    assert_eq!(broadcasts.rows.lock().unwrap().len(), 4);
}

#[tokio::test]
async fn send_to_all_requires_subject_body_and_recipients() {
    let subscribers = Arc::new(FakeSubscriberRepo::default());
    let broadcasts = Arc::new(FakeBroadcastRepo::default());
    let mailer = Arc::new(RecordingMailer::default());
    let service = broadcast_service(&subscribers, &broadcasts, &mailer);

    assert!(matches!(
        service.send_to_all("", "<p>x</p>").await.unwrap_err(),
        AppError::Mail(MailError::MissingField("subject"))
    ));
    assert!(matches!(
        service.send_to_all("Hi", "  ").await.unwrap_err(),
        AppError::Mail(MailError::MissingField("html"))
    ));
    assert!(matches!(
        service.send_to_all("Hi", "<p>x</p>").await.unwrap_err(),
        AppError::NotFound(_)
    ));
}

#[tokio::test]
async fn send_one_logs_the_broadcast() {
    let subscribers = Arc::new(FakeSubscriberRepo::default());
    let broadcasts = Arc::new(FakeBroadcastRepo::default());
    let mailer = Arc::new(RecordingMailer::default());
    let service = broadcast_service(&subscribers, &broadcasts, &mailer);

    let record = service
        .send_one("solo@example.com", "Hi", "<p>one</p>")
        .await
        .unwrap();

    assert_eq!(record.email, "solo@example.com");
    assert_eq!(mailer.sent.lock().unwrap().len(), 1);
    assert_eq!(broadcasts.rows.lock().unwrap().len(), 1);
}

// ---- profiles -------------------------------------------------------------

#[tokio::test]
async fn profile_update_upserts_for_new_user() {
    let repo = Arc::new(FakeProfileRepo::default());
    let store = Arc::new(FakeStore::default());
    let service = ProfileService::new(repo.clone(), store.clone());

    let user_id = Uuid::new_v4();
    let patch = ProfilePatch {
        full_name: Some("Grace Hopper".to_string()),
        bio: Some("Compilers".to_string()),
        ..Default::default()
    };
    let profile = service
        .update(&user_id.to_string(), patch, Some(png_upload()))
        .await
        .unwrap();

    assert_eq!(profile.full_name, "Grace Hopper");
    assert!(profile.media.is_some());

    let fetched = service.get(&user_id.to_string()).await.unwrap();
    assert_eq!(fetched.bio, "Compilers");
}

#[tokio::test]
async fn profile_get_for_unknown_user_is_not_found() {
    let repo = Arc::new(FakeProfileRepo::default());
    let store = Arc::new(FakeStore::default());
    let service = ProfileService::new(repo, store);

    let err = service.get(&Uuid::new_v4().to_string()).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

// ---- admin ----------------------------------------------------------------

#[tokio::test]
async fn monthly_signups_are_zero_filled() {
    let service = AdminService::new(Arc::new(FakeStatsRepo {
        rows: vec![(3, 5), (12, 2)],
    }));

    let months = service.monthly_signups(2024).await.unwrap();
    assert_eq!(months.len(), 12);
    assert_eq!(months[0].month, "January");
    assert_eq!(months[0].total, 0);
    assert_eq!(months[2].month, "March");
    assert_eq!(months[2].total, 5);
    assert_eq!(months[11].total, 2);
}

#[tokio::test]
async fn implausible_year_is_rejected() {
    let service = AdminService::new(Arc::new(FakeStatsRepo { rows: vec![] }));
    assert!(matches!(
        service.monthly_signups(12).await.unwrap_err(),
        AppError::Validation(_)
    ));
}
