use super::{
    is_valid_email, ContactEndpoint, ContactError, ContactForm, ContactMessage, ContactSession,
    Field, StatusKind, FAILURE_MESSAGE,
};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

struct FakeEndpoint {
    reply: Result<String, u16>,
    received: Mutex<Vec<ContactMessage>>,
}

impl FakeEndpoint {
    fn new(reply: Result<String, u16>) -> Arc<Self> {
        Arc::new(Self {
            reply,
            received: Mutex::new(Vec::new()),
        })
    }
}

impl ContactEndpoint for FakeEndpoint {
    fn submit(&self, message: &ContactMessage) -> Result<String, ContactError> {
        self.received.lock().unwrap().push(message.clone());
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(status) => Err(ContactError::Rejected {
                status: *status,
                message: "smtp down".to_string(),
            }),
        }
    }
}

fn filled_form() -> ContactForm {
    let mut form = ContactForm {
        name: "Ada".to_string(),
        email: " ada@example.com ".to_string(),
        subject: "Hello".to_string(),
        ..ContactForm::default()
    };
    form.message = edtui::EditorState::new(edtui::Lines::from("Line one\nLine two"));
    form
}

fn wait_for(session: &mut ContactSession, now: Instant) -> bool {
    for _ in 0..400 {
        if let Some(delivered) = session.poll(now) {
            return delivered;
        }
        thread::sleep(Duration::from_millis(5));
    }
    panic!("submission never finished");
}

#[test]
fn test_email_shape() {
    assert!(is_valid_email("ada@example.com"));
    assert!(is_valid_email("a@b.c"));
    assert!(!is_valid_email("ada.example.com"));
    assert!(!is_valid_email("@example.com"));
    assert!(!is_valid_email("ada@example"));
    assert!(!is_valid_email("ada@.com"));
    assert!(!is_valid_email("ada@example."));
}

#[test]
fn test_validation_requires_every_field() {
    let mut message = filled_form().to_message();
    assert!(message.validate().is_ok());

    message.subject = "   ".to_string();
    assert!(matches!(
        message.validate(),
        Err(ContactError::MissingField { field: "Subject" })
    ));
}

#[test]
fn test_form_snapshot_trims_and_joins_message() {
    let message = filled_form().to_message();
    assert_eq!(message.email, "ada@example.com");
    assert_eq!(message.message, "Line one\nLine two");
}

#[test]
fn test_field_focus_cycles() {
    assert_eq!(Field::Message.next(), Field::Name);
    assert_eq!(Field::Name.prev(), Field::Message);

    let mut form = ContactForm::default();
    form.focused_input().unwrap().push('x');
    assert_eq!(form.name, "x");
    form.focus = Field::Message;
    assert!(form.focused_input().is_none());
}

#[test]
fn test_invalid_form_is_not_sent() {
    let endpoint = FakeEndpoint::new(Ok("thanks".to_string()));
    let mut session = ContactSession::new(endpoint.clone(), Duration::from_secs(5));
    let now = Instant::now();
    let mut form = filled_form();
    form.email = "not-an-email".to_string();

    assert!(!session.submit(&form, now));

    assert!(!session.submitting);
    let status = session.status.clone().unwrap();
    assert_eq!(status.kind, StatusKind::Error);
    assert_eq!(status.text, "Please enter a valid email address.");
    assert!(endpoint.received.lock().unwrap().is_empty());
}

#[test]
fn test_successful_submission_reports_endpoint_text() {
    let endpoint = FakeEndpoint::new(Ok("Thanks, talk soon".to_string()));
    let mut session = ContactSession::new(endpoint.clone(), Duration::from_secs(5));
    let now = Instant::now();

    assert!(session.submit(&filled_form(), now));
    assert!(session.submitting);
    assert!(!session.submit(&filled_form(), now), "in-flight submit is ignored");

    assert!(wait_for(&mut session, now));
    assert!(!session.submitting);
    let status = session.status.clone().unwrap();
    assert_eq!(status.kind, StatusKind::Success);
    assert_eq!(status.text, "Thanks, talk soon");
    assert_eq!(endpoint.received.lock().unwrap().len(), 1);
}

#[test]
fn test_failure_shows_generic_message_and_clears_flag() {
    let endpoint = FakeEndpoint::new(Err(500));
    let mut session = ContactSession::new(endpoint, Duration::from_secs(5));
    let now = Instant::now();

    session.submit(&filled_form(), now);

    assert!(!wait_for(&mut session, now));
    assert!(!session.submitting);
    assert_eq!(session.status.clone().unwrap().text, FAILURE_MESSAGE);
}

#[test]
fn test_status_hides_after_dismiss_delay() {
    let endpoint = FakeEndpoint::new(Ok("ok".to_string()));
    let mut session = ContactSession::new(endpoint, Duration::from_secs(5));
    let now = Instant::now();
    let mut form = filled_form();
    form.name.clear();
    session.submit(&form, now);

    session.expire(now + Duration::from_millis(4_999));
    assert!(session.status.is_some());
    session.expire(now + Duration::from_secs(5));
    assert!(session.status.is_none());
}

struct CrashingEndpoint;

impl ContactEndpoint for CrashingEndpoint {
    fn submit(&self, _message: &ContactMessage) -> Result<String, ContactError> {
        panic!("worker crashed");
    }
}

#[test]
fn test_dead_worker_is_reported_as_failure() {
    let mut session = ContactSession::new(Arc::new(CrashingEndpoint), Duration::from_secs(5));
    let now = Instant::now();

    assert!(session.submit(&filled_form(), now));

    assert!(!wait_for(&mut session, now));
    assert!(!session.submitting);
    assert_eq!(session.status.clone().unwrap().text, FAILURE_MESSAGE);
    assert_eq!(session.poll(now), None, "nothing left to collect");
}
