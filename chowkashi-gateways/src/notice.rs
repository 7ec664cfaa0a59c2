use chowkashi_core::gateways::notice::{Notice, NoticeGateway};

/// Publishes user notices through the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotices;

impl NoticeGateway for LogNotices {
    fn notify(&self, notice: Notice) {
        log::warn!("{notice}");
    }
}
