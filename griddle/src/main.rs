fn main() {
    searchlight_cli::execute::<griddle::State>();
}
