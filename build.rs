fn main() {
    // Host builds (`--no-default-features`) have no ESP-IDF toolchain to
    // export; only the firmware image needs the linker arguments.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
