use skein_ioc::{global, name_of, resolve, Concrete, Instance};
use std::sync::Arc;

trait MessageSender: Send + Sync {
  fn send(&self, to: &str, message: &str) -> String;
}

struct EmailSender;
impl MessageSender for EmailSender {
  fn send(&self, to: &str, message: &str) -> String {
    format!("Sending email to {}: '{}'", to, message)
  }
}

struct SmsSender;
impl MessageSender for SmsSender {
  fn send(&self, to: &str, message: &str) -> String {
    format!("Sending SMS to {}: '{}'", to, message)
  }
}

fn main() {
  // The interface name resolves to the default implementation, shared.
  global().singleton(
    name_of::<dyn MessageSender>(),
    Concrete::factory(|_, _| Ok(Instance::from_trait::<dyn MessageSender>(Arc::new(EmailSender)))),
  );

  // Alternatives live under their own aliases.
  global().bind(
    ["sms", "text-message"],
    Concrete::factory(|_, _| Ok(Instance::from_trait::<dyn MessageSender>(Arc::new(SmsSender)))),
  );

  let email = resolve!(trait MessageSender);
  let sms = resolve!(trait MessageSender, "text-message");

  let result1 = email.send("test@example.com", "Hello from Skein!");
  let result2 = sms.send("+123456789", "Hello from Skein!");

  println!("{}", result1);
  println!("{}", result2);

  assert!(result1.contains("email"));
  assert!(result2.contains("SMS"));
}
