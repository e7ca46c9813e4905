//! Entry point for the WASM application

pub fn main() {
    offer_assistant::run();
}
