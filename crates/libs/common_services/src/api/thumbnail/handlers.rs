use crate::api::thumbnail::error::error_response;
use crate::api::thumbnail::interfaces::ThumbnailArgs;
use crate::api::thumbnail::service::ThumbnailService;
use common_types::{MethodCall, MethodResponse, OutputMode};
use tracing::debug;

/// Handles one call from the host bridge.
///
/// The gate is taken before the call is looked at, so while a request is in flight every call
/// is answered with `already_active`. `file` and `data` are acknowledged with `true` once
/// admitted and their results follow on the delivery channel. Unknown methods are answered
/// with [`MethodResponse::NotImplemented`]. The gate is released again whenever a call is
/// answered without spawning work.
pub fn handle_method_call(service: &ThumbnailService, call: MethodCall) -> MethodResponse {
    let pending = match service.admit() {
        Ok(pending) => pending,
        Err(e) => return error_response(&e),
    };

    let Ok(mode) = call.method.parse::<OutputMode>() else {
        debug!("Method {} is not implemented", call.method);
        return MethodResponse::NotImplemented;
    };

    let request = match ThumbnailArgs::from_value(call.arguments)
        .and_then(|args| args.into_request(mode))
    {
        Ok(request) => request,
        Err(e) => return error_response(&e),
    };

    match service.dispatch(pending, mode, request) {
        Ok(()) => MethodResponse::accepted(),
        Err(e) => error_response(&e),
    }
}
