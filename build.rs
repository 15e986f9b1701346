fn main() {
    // Emits the ESP-IDF link/sysroot environment when cross-building for the
    // espidf target; a no-op on host builds.
    embuild::espidf::sysenv::output();
}
