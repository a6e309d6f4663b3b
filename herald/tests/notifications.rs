use futures::StreamExt;
use herald::{
    BoxError, Notification, NotificationResponse, Registry, Subscriber,
    subscribers::{ChannelSubscriber, LoggingSubscriber, SubscriberEvent},
};
use std::sync::{Arc, Mutex};

/// Keeps the last text reply typed by the user.
#[derive(Default)]
struct ReplyInbox {
    last_reply: Mutex<Option<String>>,
    opened: Mutex<Vec<String>>,
}

impl Subscriber for ReplyInbox {
    fn on_received(&self, _notification: &Notification) -> Result<(), BoxError> {
        Ok(())
    }

    fn on_response_received(&self, response: &NotificationResponse) -> Result<(), BoxError> {
        if response.is_default_action() {
            self.opened
                .lock()
                .unwrap()
                .push(response.notification().identifier().to_string());
        } else if let Some(text) = response.user_text() {
            *self.last_reply.lock().unwrap() = Some(text.to_string());
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "reply-inbox"
    }
}

#[test]
fn test_cold_start_tap_reaches_first_subscriber() {
    // The app was launched by tapping a notification: the response arrives
    // before the UI has subscribed.
    let registry: Registry = Registry::builder().name("notifications").build();
    let publisher = registry.publisher();
    let message = Notification::new("chat-17").title("Ada").body("lunch?");

    assert!(publisher.response(NotificationResponse::opened(message.clone())).buffered);
    assert!(
        publisher
            .response(NotificationResponse::new("reply", message).with_user_text("sure"))
            .buffered
    );

    let inbox = Arc::new(ReplyInbox::default());
    let logger = Arc::new(LoggingSubscriber);
    let _inbox_subscription = registry.subscribe(&inbox);
    let _logger_subscription = registry.subscribe(&logger);

    assert_eq!(*inbox.opened.lock().unwrap(), vec!["chat-17".to_string()]);
    assert_eq!(inbox.last_reply.lock().unwrap().as_deref(), Some("sure"));

    let report = publisher.received(&Notification::new("chat-18"));
    assert_eq!(report.delivered, 2);
}

#[tokio::test]
async fn test_bridge_stream_sees_notification_flow() {
    let registry: Registry = Registry::new();
    let (bridge, mut events) = ChannelSubscriber::named("script-bridge");
    let subscription = registry.subscribe(&bridge);

    let message = Notification::new("promo-1").data("campaign", "spring");
    registry.publish_received(&message);
    registry.publish_response(NotificationResponse::opened(message.clone()));
    registry.publish_dropped();

    assert_eq!(events.next().await, Some(SubscriberEvent::Received(message.clone())));
    match events.next().await {
        Some(SubscriberEvent::Response(response)) => {
            assert_eq!(response.notification(), &message);
            assert!(response.is_default_action());
        }
        other => panic!("unexpected event: {other:?}"),
    }
    assert_eq!(events.next().await, Some(SubscriberEvent::Dropped));

    drop(subscription);
    registry.publish_received(&Notification::new("promo-2"));
    drop(bridge);
    assert_eq!(events.next().await, None);
}
