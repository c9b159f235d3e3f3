fn main() {
    // Host builds (default feature set) have no ESP-IDF environment to
    // propagate; only the on-device binary needs the sysenv output.
    if std::env::var("CARGO_FEATURE_ESPIDF").is_ok() {
        embuild::espidf::sysenv::output();
    }
}
