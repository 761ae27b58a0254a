#[cfg(feature = "lambda")]
use grant_match::app::gateway::{dispatch, ProxyRequest, ProxyResponse};
#[cfg(feature = "lambda")]
use grant_match::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use grant_match::{FunctionConfig, GrantFunction};
#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};

#[cfg(feature = "lambda")]
async fn function_handler(
    function: &GrantFunction,
    event: LambdaEvent<ProxyRequest>,
) -> Result<ProxyResponse, Error> {
    Ok(dispatch(function, event.payload).await)
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    // 憑證缺失不在這裡擋：每個請求各自回 500
    let config = FunctionConfig::from_env()?;
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        return Err(e.into());
    }
    let function = GrantFunction::new(config)?;
    let function = &function;

    run(service_fn(move |event: LambdaEvent<ProxyRequest>| async move {
        function_handler(function, event).await
    }))
    .await
}
