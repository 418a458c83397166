fn main() -> eframe::Result<()> {
    xhelper::run()
}
