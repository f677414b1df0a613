fn main() {
    // esp-hal's linker script pulls in the memory map and the rtos/radio sections.
    println!("cargo:rustc-link-arg=-Tlinkall.x");
}
