fn main() -> Result<(), Box<dyn std::error::Error>> {
    singalong::runtime::run()
}
