fn main() {
    #[cfg(feature = "gui")]
    slint_build::compile("src/frontend/gui/components/main.slint")
        .expect("failed to compile the Slint GUI components");
}
