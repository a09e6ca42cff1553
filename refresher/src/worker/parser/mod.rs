pub mod trigger_message;
