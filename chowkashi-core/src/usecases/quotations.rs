use super::prelude::*;
use crate::util::validate::{AutoCorrect, Validate};

#[rustfmt::skip]
#[derive(Debug, Clone)]
pub struct NewQuotation {
    pub request_id  : String,
    pub provider_id : String,
    pub amount      : Amount,
    pub message     : Option<String>,
    pub valid_until : Option<Timestamp>,
}

pub async fn submit_quotation<R>(repo: &R, new_quotation: NewQuotation) -> Result<Quotation>
where
    R: QuotationRepo,
{
    let NewQuotation {
        request_id,
        provider_id,
        amount,
        message,
        valid_until,
    } = new_quotation;
    let quotation = Quotation {
        id: Id::new(),
        request_id: request_id.into(),
        provider_id: provider_id.into(),
        amount,
        message,
        valid_until,
        status: QuotationStatus::Pending,
        created_at: Timestamp::now(),
    }
    .auto_correct();
    quotation.validate()?;

    let request = repo.get_service_request(quotation.request_id.as_str()).await?;
    if !request.is_open() {
        return Err(Error::RequestClosed);
    }
    let existing = repo.quotations_of_request(request.id.as_str()).await?;
    if existing
        .iter()
        .any(|q| q.provider_id == quotation.provider_id && q.is_pending())
    {
        return Err(Error::DuplicateQuotation);
    }
    log::debug!(
        "Provider {} quotes {} for request {}",
        quotation.provider_id,
        quotation.amount,
        request.id
    );
    repo.create_quotation(quotation.clone()).await?;
    Ok(quotation)
}

/// Accepts a quotation on behalf of the requester.
///
/// All other pending quotations of the request are rejected
/// and the request is closed.
pub async fn accept_quotation<R>(repo: &R, requester: &str, quotation_id: &str) -> Result<Quotation>
where
    R: QuotationRepo,
{
    let quotation = repo.get_quotation(quotation_id).await?;
    let request = repo
        .get_service_request(quotation.request_id.as_str())
        .await?;
    if request.requester.as_str() != requester {
        return Err(Error::Forbidden);
    }
    if !request.is_open() {
        return Err(Error::RequestClosed);
    }
    if !quotation.is_pending() {
        return Err(Error::QuotationNotPending);
    }
    if quotation.is_expired_at(Timestamp::now()) {
        return Err(Error::QuotationExpired);
    }

    repo.update_quotation_status(quotation_id, QuotationStatus::Accepted)
        .await?;
    let competing = repo.quotations_of_request(request.id.as_str()).await?;
    for other in competing
        .iter()
        .filter(|q| q.id != quotation.id && q.is_pending())
    {
        repo.update_quotation_status(other.id.as_str(), QuotationStatus::Rejected)
            .await?;
    }
    repo.update_service_request_status(request.id.as_str(), RequestStatus::Closed)
        .await?;
    Ok(Quotation {
        status: QuotationStatus::Accepted,
        ..quotation
    })
}

pub async fn withdraw_quotation<R>(repo: &R, provider_id: &str, quotation_id: &str) -> Result<()>
where
    R: QuotationRepo,
{
    let quotation = repo.get_quotation(quotation_id).await?;
    if quotation.provider_id.as_str() != provider_id {
        return Err(Error::Forbidden);
    }
    if !quotation.is_pending() {
        return Err(Error::QuotationNotPending);
    }
    repo.update_quotation_status(quotation_id, QuotationStatus::Withdrawn)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{super::tests::MockDb, *};
    use crate::{repositories, util::validate::QuotationInvalidation};
    use futures::executor::block_on;

    fn db_with_request(status: RequestStatus) -> MockDb {
        let db = MockDb::default();
        db.service_requests.lock().unwrap().push(ServiceRequest {
            id: "req".into(),
            requester: "alice".into(),
            category: Some("Plumbers".into()),
            description: "Leaking kitchen tap".into(),
            postal_code: Some("560001".into()),
            status,
            created_at: Timestamp::now(),
        });
        db
    }

    fn new_quotation(provider: &str, rupees: u64) -> NewQuotation {
        NewQuotation {
            request_id: "req".into(),
            provider_id: provider.into(),
            amount: Amount::from_rupees(rupees),
            message: Some(" Can come <b>today</b> ".into()),
            valid_until: None,
        }
    }

    fn status_of(db: &MockDb, id: &Id) -> QuotationStatus {
        db.quotations
            .lock()
            .unwrap()
            .iter()
            .find(|q| &q.id == id)
            .unwrap()
            .status
    }

    #[test]
    fn submit_pending_quotation() {
        let db = db_with_request(RequestStatus::Open);
        let q = block_on(submit_quotation(&db, new_quotation("bob", 450))).unwrap();
        assert_eq!(q.status, QuotationStatus::Pending);
        assert_eq!(q.message.as_deref(), Some("Can come today"));
        assert_eq!(db.quotations.lock().unwrap().len(), 1);
    }

    #[test]
    fn reject_invalid_submissions() {
        let db = db_with_request(RequestStatus::Open);
        assert!(matches!(
            block_on(submit_quotation(&db, new_quotation("bob", 0))),
            Err(Error::Quotation(QuotationInvalidation::Amount))
        ));
        block_on(submit_quotation(&db, new_quotation("bob", 450))).unwrap();
        assert!(matches!(
            block_on(submit_quotation(&db, new_quotation("bob", 400))),
            Err(Error::DuplicateQuotation)
        ));
        let mut unknown = new_quotation("carol", 100);
        unknown.request_id = "nope".into();
        assert!(matches!(
            block_on(submit_quotation(&db, unknown)),
            Err(Error::Repo(repositories::Error::NotFound))
        ));

        let closed = db_with_request(RequestStatus::Closed);
        assert!(matches!(
            block_on(submit_quotation(&closed, new_quotation("bob", 450))),
            Err(Error::RequestClosed)
        ));
    }

    #[test]
    fn accept_quotation_rejects_the_others_and_closes_the_request() {
        let db = db_with_request(RequestStatus::Open);
        let bob = block_on(submit_quotation(&db, new_quotation("bob", 450))).unwrap();
        let carol = block_on(submit_quotation(&db, new_quotation("carol", 500))).unwrap();
        let dave = block_on(submit_quotation(&db, new_quotation("dave", 300))).unwrap();
        block_on(withdraw_quotation(&db, "dave", dave.id.as_str())).unwrap();

        assert!(matches!(
            block_on(accept_quotation(&db, "mallory", bob.id.as_str())),
            Err(Error::Forbidden)
        ));
        let accepted = block_on(accept_quotation(&db, "alice", bob.id.as_str())).unwrap();
        assert_eq!(accepted.status, QuotationStatus::Accepted);
        assert_eq!(status_of(&db, &bob.id), QuotationStatus::Accepted);
        assert_eq!(status_of(&db, &carol.id), QuotationStatus::Rejected);
        assert_eq!(status_of(&db, &dave.id), QuotationStatus::Withdrawn);
        assert_eq!(
            db.service_requests.lock().unwrap()[0].status,
            RequestStatus::Closed
        );
        assert!(matches!(
            block_on(accept_quotation(&db, "alice", carol.id.as_str())),
            Err(Error::RequestClosed)
        ));
    }

    #[test]
    fn withdraw_only_own_pending_quotations() {
        let db = db_with_request(RequestStatus::Open);
        let q = block_on(submit_quotation(&db, new_quotation("bob", 450))).unwrap();
        assert!(matches!(
            block_on(withdraw_quotation(&db, "carol", q.id.as_str())),
            Err(Error::Forbidden)
        ));
        block_on(withdraw_quotation(&db, "bob", q.id.as_str())).unwrap();
        assert!(matches!(
            block_on(withdraw_quotation(&db, "bob", q.id.as_str())),
            Err(Error::QuotationNotPending)
        ));
    }
}
