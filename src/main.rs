fn main() -> Result<(), Box<dyn std::error::Error>> {
    recipe_bot::cli::main()
}
