mod goto_expressions_tests;
