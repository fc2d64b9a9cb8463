//! Static walkthrough for registering fingerprints with the Firebase console.

use crate::output;

/// Prints the console setup steps and troubleshooting notes.
pub fn print_setup_guide() {
    output::print_section("Registering your fingerprints");
    println!(
        "\
 1. Open https://console.firebase.google.com and select your project
    (or create one for your app).
 2. Open Project settings and pick your Android app, or add one using
    your application's package id.
 3. Under 'SHA certificate fingerprints', click 'Add fingerprint' and
    paste the SHA-1 value printed above. Add the SHA-256 value the same
    way if your sign-in providers require it.
 4. Repeat for every keystore you ship builds from: debug builds are
    signed with the debug keystore, store builds with your production
    keystore. Each signing key needs its own fingerprint entry.
 5. Download the refreshed google-services.json and place it in your
    project before rebuilding."
    );

    output::print_section("Troubleshooting");
    println!(
        "\
 - Sign-in fails only in release builds: the production keystore's
   fingerprint is probably missing from the console. Run this tool with
   --keystore pointing at your release keystore.
 - Using Play App Signing: Google re-signs your app with its own key.
   Copy the SHA-1 and SHA-256 from Play Console under Release > Setup >
   App signing and register those too.
 - Fingerprints changed after moving machines: every machine has its own
   debug keystore. Register the new machine's fingerprint or copy
   ~/.android/debug.keystore across.
 - Verify what a device actually runs with --package <id> and a
   connected device; the installed APK's signer is the one that counts."
    );
}
