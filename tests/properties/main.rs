mod days_tests;
