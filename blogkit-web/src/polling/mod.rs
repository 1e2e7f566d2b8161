//! Polling clients bound to the page

pub mod unread;
pub mod weather;

use std::rc::Rc;

use crate::state::PageSession;

pub fn start_all(session: &Rc<PageSession>) {
    unread::start(session);
    weather::bind(session);
}
