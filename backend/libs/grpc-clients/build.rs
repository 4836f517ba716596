fn main() -> Result<(), Box<dyn std::error::Error>> {
    tonic_build::configure()
        .build_server(false)
        .build_client(true)
        .compile_protos(
            &[
                "../../proto/services/cart_service.proto",
                "../../proto/services/payment_service.proto",
            ],
            &["../../proto/services"],
        )?;
    Ok(())
}
