mod error {
    mod protocol;
    mod session;
}

mod session_tests {
    pub mod helpers;
    mod directory;
    mod lifecycle;
    mod room;
}
