//! One `impl EmChat` block per remote resource.
//! Every method here runs the token guard and then sends exactly one request.

mod chat_history;
mod chatrooms;
mod files;
mod groups;
mod messages;
mod users;
