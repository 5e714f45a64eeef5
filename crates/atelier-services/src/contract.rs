//! Contact-request handling.
//!
//! Visitors submit contracts; admins list and filter them, reply by email
//! (which flips the status to responded) and delete them.

use std::sync::Arc;

use atelier_core::models::{Contract, ContractDraft, ContractStatus};
use atelier_core::pagination::{Page, PageInfo};
use atelier_core::repository::ContractRepository;
use atelier_core::{AppError, AppResult, Filter, MailError, Predicate};

use crate::content::{parse_id, ListQuery};
use crate::mailer::{Mailer, OutboundEmail};
use crate::templates;

const SEARCH_FIELDS: &[&str] = &["full_name"];
const RESPONSE_SUBJECT: &str = "Re: your message";

pub struct ContractService {
    repo: Arc<dyn ContractRepository>,
    mailer: Arc<dyn Mailer>,
    default_limit: u32,
}

impl ContractService {
    pub fn new(repo: Arc<dyn ContractRepository>, mailer: Arc<dyn Mailer>, default_limit: u32) -> Self {
        Self {
            repo,
            mailer,
            default_limit,
        }
    }

    pub async fn create(&self, draft: ContractDraft) -> AppResult<Contract> {
        draft.validate()?;
        let contract = self.repo.insert(&draft).await?;
        tracing::info!(id = %contract.id, "Contract submitted");
        Ok(contract)
    }

    /// List with the usual search/date filters plus an optional status filter.
    pub async fn list(
        &self,
        query: ListQuery,
        status: Option<ContractStatus>,
    ) -> AppResult<Page<Contract>> {
        let mut predicate = Filter::build(
            query.search.as_deref(),
            query.date.as_deref(),
            SEARCH_FIELDS,
        )?;
        if let Some(status) = status {
            predicate = predicate.and(Predicate::FieldEquals {
                field: "status",
                value: status.as_str().to_string(),
            });
        }

        let (page, limit) = query.page.normalize(self.default_limit);
        let total = self.repo.count(&predicate).await?;
        let pagination = PageInfo::compute(page, limit, total);
        let items = self
            .repo
            .search(&predicate, query.sort, pagination.offset(), limit)
            .await?;
        Ok(Page { items, pagination })
    }

    pub async fn get(&self, id: &str) -> AppResult<Contract> {
        let id = parse_id(id, "contract")?;
        self.repo
            .fetch(id)
            .await?
            .ok_or_else(|| AppError::NotFound("contract not found".to_string()))
    }

    /// Email the admin's response to the submitter, then mark the contract as
    /// responded. The status only flips after the send succeeds.
    pub async fn respond(&self, id: &str, response: &str) -> AppResult<Contract> {
        let response = response.trim();
        if response.is_empty() {
            return Err(MailError::MissingField("message").into());
        }

        let mut contract = self.get(id).await?;
        let email = OutboundEmail {
            to: contract.email.clone(),
            subject: RESPONSE_SUBJECT.to_string(),
            html: templates::contract_response(&contract, response),
        };
        self.mailer.send(&email).await?;

        contract.status = ContractStatus::Responded;
        let saved = self.repo.save(&contract).await?;
        tracing::info!(id = %saved.id, "Contract responded");
        Ok(saved)
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let id = parse_id(id, "contract")?;
        if !self.repo.remove(id).await? {
            return Err(AppError::NotFound("contract not found".to_string()));
        }
        Ok(())
    }
}
